// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTrace local API server
//!
//! Owns the session and the local store, and serves the calculator, tips
//! and Eco-Coach to the browser front-end over loopback.

use ecotrace::{config::Config, services::CoachService, store::FileStore, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting EcoTrace API");

    // Open the local store
    let store = FileStore::open(&config.data_path)?;

    let coach = CoachService::from_config(&config)?;
    tracing::info!(
        configured = coach.is_configured(),
        model = %config.gemini_model,
        "Eco-Coach initialized"
    );

    // Build shared state and read any saved session
    let state = Arc::new(AppState::new(config.clone(), Arc::new(store), coach));
    let session = state.auth.restore().await;
    tracing::info!(state = session.label(), "Session loaded");

    // Build router
    let app = ecotrace::routes::create_router(state);

    // Start server
    let addr = format!("{}:{}", config.bind_addr, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("ecotrace=debug,info"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
