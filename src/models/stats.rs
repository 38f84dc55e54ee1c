//! Streak and activity summary derived from a day series.
//!
//! Both the GitHub and mock paths feed their days through
//! [`ContributionStats::from_days`], so derived fields always agree.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::contribution::{sum_counts, ContributionDay};

/// Active/inactive day counts and the per-day average.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContributionSummary {
    pub active_days: u32,
    pub inactive_days: u32,
    /// Mean count per day, rounded to 2 decimals. 0 for an empty series.
    pub average_contributions_per_day: f64,
}

/// Everything computed from the day series in one pass over the data.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContributionStats {
    pub longest_streak: u32,
    pub current_streak: u32,
    pub summary: ContributionSummary,
}

impl ContributionStats {
    /// Compute streaks and summary for days in chronological order.
    pub fn from_days(days: &[ContributionDay]) -> Self {
        // ─── Longest Streak ──────────────────────────────────────────
        let mut longest_streak = 0u32;
        let mut run = 0u32;
        for day in days {
            if day.is_active() {
                run += 1;
                longest_streak = longest_streak.max(run);
            } else {
                run = 0;
            }
        }

        // ─── Current Streak (trailing run) ───────────────────────────
        let current_streak = days
            .iter()
            .rev()
            .take_while(|day| day.is_active())
            .count() as u32;

        // ─── Summary ─────────────────────────────────────────────────
        let total_days = days.len() as u32;
        let active_days = days.iter().filter(|day| day.is_active()).count() as u32;
        let average_contributions_per_day = if days.is_empty() {
            0.0
        } else {
            round2(sum_counts(days) as f64 / days.len() as f64)
        };

        Self {
            longest_streak,
            current_streak,
            summary: ContributionSummary {
                active_days,
                inactive_days: total_days - active_days,
                average_contributions_per_day,
            },
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
