//! Application setup and initialization
//!
//! Kept apart from main.rs so tests can build the same router around a fake
//! asset provider.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::{Context, Result};
use imgrelay_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    // Validate configuration first - fail fast on misconfiguration
    config
        .validate()
        .context("Configuration validation failed")?;

    crate::telemetry::init_telemetry(config.log_format(), config.environment())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        cloud_name = %config.cloudinary.cloud_name,
        uploads_dir = %config.uploads_dir().display(),
        "Configuration loaded and validated successfully"
    );

    let provider = services::setup_provider(&config)?;
    let state = services::initialize_state(&config, provider);
    let router = routes::setup_routes(&config, state.clone());

    Ok((state, router))
}
