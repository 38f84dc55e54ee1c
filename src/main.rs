// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Devcard Contributions API Server
//!
//! Serves GitHub contribution calendars, streaks and activity summaries
//! for the portfolio frontend.

use devcard_contributions::{
    config::Config,
    services::{ContributionService, GitHubClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Devcard Contributions API");

    if config.github_token.is_none() {
        tracing::warn!("GITHUB_TOKEN not set; only mock data and POST requests will work");
    }

    let github = GitHubClient::new(config.github_graphql_url.clone());
    tracing::info!(endpoint = %config.github_graphql_url, "GitHub client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        contributions: ContributionService::new(Arc::new(github)),
    });

    // Build router
    let app = devcard_contributions::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("devcard_contributions=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
