// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod contribution;
pub mod dataset;
pub mod stats;

pub use contribution::{contribution_level, ContributionCalendar, ContributionDay};
pub use dataset::{ContributionDataset, DateRange};
pub use stats::{ContributionStats, ContributionSummary};
