// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Devcard contributions: GitHub activity data for the portfolio site.
//!
//! This crate provides the backend API that fetches a user's contribution
//! calendar from GitHub (or generates mock data), flattens it into a day
//! series and derives streaks and summary statistics.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::ContributionService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub contributions: ContributionService,
}
