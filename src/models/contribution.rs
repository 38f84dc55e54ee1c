// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Per-day contribution records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Highest heatmap intensity level.
pub const MAX_LEVEL: u8 = 4;

/// Contribution count for a single calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContributionDay {
    /// Calendar date (`YYYY-MM-DD`)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub count: u32,
    /// Heatmap intensity, 0-4. Always `contribution_level(count)`.
    pub level: u8,
}

impl ContributionDay {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self {
            date,
            count,
            level: contribution_level(count),
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }
}

/// Bucket a daily count into a heatmap level.
///
/// 0 → 0, 1-2 → 1, 3-5 → 2, 6-10 → 3, 11+ → 4.
pub fn contribution_level(count: u32) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=5 => 2,
        6..=10 => 3,
        _ => MAX_LEVEL,
    }
}

/// Flat day series plus the total reported alongside it.
///
/// For upstream data `total_contributions` is GitHub's own aggregate and can
/// differ from the sum of `days` (it may count activity the calendar omits).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContributionCalendar {
    pub days: Vec<ContributionDay>,
    pub total_contributions: u64,
}

impl ContributionCalendar {
    /// Build a calendar whose total is the sum of its days.
    pub fn from_days(days: Vec<ContributionDay>) -> Self {
        let total_contributions = sum_counts(&days);
        Self {
            days,
            total_contributions,
        }
    }

    /// Sum of the per-day counts, independent of `total_contributions`.
    pub fn day_sum(&self) -> u64 {
        sum_counts(&self.days)
    }
}

pub(crate) fn sum_counts(days: &[ContributionDay]) -> u64 {
    days.iter().map(|d| u64::from(d.count)).sum()
}
