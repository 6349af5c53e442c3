// ABOUTME: Core types and constants for the Autologic connected-car platform
// ABOUTME: Foundation crate with error handling, upstream constants, and telemetry models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

#![deny(unsafe_code)]

//! # Autologic Core
//!
//! Foundation crate providing shared types and constants for the Autologic
//! connected-car backend. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` for HTTP responses and `ConnectedCarError`
//!   for the OAuth and telemetry layers
//! - **constants**: Upstream endpoints, the OAuth scope set, facet keys, env names
//! - **models**: Token pairs, telemetry facet records and the aggregate status record

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Value models for tokens and vehicle telemetry
pub mod models;
