// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Response payload for the contributions endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::contribution::{ContributionCalendar, ContributionDay};
use crate::models::stats::{ContributionStats, ContributionSummary};

/// First and last date present in a series, plus its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DateRange {
    /// Earliest date, `None` for an empty series
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub from: Option<NaiveDate>,
    /// Latest date, `None` for an empty series
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub to: Option<NaiveDate>,
    pub total_days: u32,
}

impl DateRange {
    /// Derive the range by explicit min/max over the dates, so the result
    /// does not depend on the series being sorted.
    pub fn from_days(days: &[ContributionDay]) -> Self {
        Self {
            from: days.iter().map(|d| d.date).min(),
            to: days.iter().map(|d| d.date).max(),
            total_days: days.len() as u32,
        }
    }
}

/// Complete contributions response. Built once per request, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ContributionDataset {
    pub contributions: Vec<ContributionDay>,
    /// Authoritative total; for GitHub data this is the upstream aggregate.
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_contributions: u64,
    pub longest_streak: u32,
    pub current_streak: u32,
    pub date_range: DateRange,
    pub summary: ContributionSummary,
}

impl ContributionDataset {
    /// Derive every aggregate field from a calendar.
    pub fn from_calendar(calendar: ContributionCalendar) -> Self {
        let stats = ContributionStats::from_days(&calendar.days);
        let date_range = DateRange::from_days(&calendar.days);

        Self {
            contributions: calendar.days,
            total_contributions: calendar.total_contributions,
            longest_streak: stats.longest_streak,
            current_streak: stats.current_streak,
            date_range,
            summary: stats.summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32, count: u32) -> ContributionDay {
        ContributionDay::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), count)
    }

    #[test]
    fn test_date_range_uses_min_max_not_position() {
        let days = vec![day(2024, 1, 3, 1), day(2024, 1, 1, 0), day(2024, 1, 2, 5)];
        let range = DateRange::from_days(&days);
        assert_eq!(range.from, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(range.to, NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(range.total_days, 3);
    }

    #[test]
    fn test_empty_range() {
        let range = DateRange::from_days(&[]);
        assert_eq!(range, DateRange::default());
    }

    #[test]
    fn test_dataset_keeps_upstream_total() {
        let calendar = ContributionCalendar {
            days: vec![day(2024, 5, 1, 2), day(2024, 5, 2, 3)],
            total_contributions: 40,
        };
        let dataset = ContributionDataset::from_calendar(calendar);
        assert_eq!(dataset.total_contributions, 40);
        assert_eq!(dataset.longest_streak, 2);
        assert_eq!(dataset.current_streak, 2);
        assert_eq!(dataset.summary.average_contributions_per_day, 2.5);
        assert_eq!(
            dataset.summary.active_days + dataset.summary.inactive_days,
            dataset.date_range.total_days
        );
    }

    #[test]
    fn test_dataset_json_shape() {
        let dataset =
            ContributionDataset::from_calendar(ContributionCalendar::from_days(vec![day(
                2023, 12, 31, 11,
            )]));
        let json = serde_json::to_value(&dataset).unwrap();

        assert_eq!(json["totalContributions"], 11);
        assert_eq!(json["longestStreak"], 1);
        assert_eq!(json["currentStreak"], 1);
        assert_eq!(json["dateRange"]["from"], "2023-12-31");
        assert_eq!(json["dateRange"]["to"], "2023-12-31");
        assert_eq!(json["dateRange"]["totalDays"], 1);
        assert_eq!(json["summary"]["activeDays"], 1);
        assert_eq!(json["summary"]["averageContributionsPerDay"], 11.0);
        assert_eq!(json["contributions"][0]["level"], 4);
    }
}
