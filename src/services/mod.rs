// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod contributions;
pub mod date_range;
pub mod github;
pub mod mock;

pub use contributions::{
    CalendarSource, ContributionRequest, ContributionService, DataMode,
};
pub use date_range::{DateRangeParams, ResolvedRange};
pub use github::GitHubClient;
pub use mock::MockGenerator;
