// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! The GitHub token is optional at startup: without it the service still
//! serves mock data, and real-data requests fail with a configuration error.

use std::env;

const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
const DEFAULT_PORT: u16 = 8080;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// GitHub personal access token used for real-data requests.
    pub github_token: Option<String>,
    /// GitHub GraphQL endpoint
    pub github_graphql_url: String,
    /// Server port
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is read first if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            github_token: env::var("GITHUB_TOKEN")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            github_graphql_url: env::var("GITHUB_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string()),
            port,
        })
    }

    /// Config for tests: a fake token and an unroutable upstream.
    pub fn test_default() -> Self {
        Self {
            github_token: Some("test_github_token".to_string()),
            github_graphql_url: "http://127.0.0.1:9/graphql".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
