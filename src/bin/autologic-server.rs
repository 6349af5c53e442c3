// ABOUTME: Server binary exposing Smartcar OAuth brokering and vehicle telemetry over HTTP
// ABOUTME: Loads environment configuration, initializes logging, and serves until Ctrl-C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Autologic

//! # Autologic Server Binary
//!
//! Starts the HTTP API for connecting vehicles and reading their telemetry.

use anyhow::{Context, Result};
use autologic_server::{
    config::environment::ServerConfig, logging, resources::ServerResources, routes,
    utils::http_client::initialize_shared_client,
};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "autologic-server")]
#[command(about = "Autologic - connected-car OAuth and vehicle telemetry API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }

    info!("{}", config.summary());
    config.smartcar.validate_and_log();

    initialize_shared_client(
        config.http_client.timeout_secs,
        config.http_client.connect_timeout_secs,
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], config.http_port));
    let app = routes::router(Arc::new(ServerResources::new(config)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP listener on {addr}"))?;
    info!(%addr, "HTTP server listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("HTTP server error: {e}");
        return Err(e.into());
    }

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}
