// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contribution data provider.
//!
//! Selects the GitHub or mock data source and funnels both through
//! [`ContributionDataset::from_calendar`], so derived fields are computed
//! the same way regardless of where the days came from.

use crate::error::AppError;
use crate::models::{ContributionCalendar, ContributionDataset};
use crate::services::date_range::{DateRangeParams, ResolvedRange};
use crate::services::mock::MockGenerator;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;

/// Upstream source of per-day contribution counts.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Fetch the calendar for `username` over `range`, authenticating with `token`.
    async fn fetch_calendar(
        &self,
        username: &str,
        token: &str,
        range: &ResolvedRange,
    ) -> Result<ContributionCalendar, AppError>;
}

/// Which data path a request takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataMode {
    Real,
    Mock,
}

impl DataMode {
    pub fn from_mock_flag(mock: bool) -> Self {
        if mock {
            DataMode::Mock
        } else {
            DataMode::Real
        }
    }
}

/// A validated request for contribution data.
#[derive(Clone)]
pub struct ContributionRequest<'a> {
    pub username: &'a str,
    pub mode: DataMode,
    /// Credential for the real path; the caller decides where it comes from.
    pub token: Option<&'a str>,
    /// Ignored in mock mode.
    pub range: &'a DateRangeParams,
    /// Log a summary of the result at INFO.
    pub debug: bool,
}

/// High-level service exposing the real and mock data paths.
#[derive(Clone)]
pub struct ContributionService {
    upstream: Arc<dyn CalendarSource>,
    mock: MockGenerator,
}

impl ContributionService {
    pub fn new(upstream: Arc<dyn CalendarSource>) -> Self {
        Self {
            upstream,
            mock: MockGenerator,
        }
    }

    /// Produce a dataset for a request, using `now` as the clock.
    pub async fn load(
        &self,
        request: &ContributionRequest<'_>,
        now: DateTime<Utc>,
    ) -> Result<ContributionDataset, AppError> {
        let dataset = match request.mode {
            DataMode::Mock => self.fetch_mock(now.date_naive())?,
            DataMode::Real => {
                let token = request.token.ok_or_else(|| {
                    AppError::Configuration("GitHub token is not set on the server".to_string())
                })?;
                let range = request.range.resolve(now)?;

                if request.debug {
                    let (from, to) = range.query_bounds();
                    tracing::info!(
                        year = ?request.range.year,
                        from_param = ?request.range.from,
                        to_param = ?request.range.to,
                        from = %from,
                        to = %to,
                        "Resolved request date range"
                    );
                }

                self.fetch_real(request.username, token, &range, request.debug)
                    .await?
            }
        };

        if request.debug {
            log_summary(request.username, request.mode, &dataset);
        }

        Ok(dataset)
    }

    /// Fetch from GitHub and derive the dataset.
    pub async fn fetch_real(
        &self,
        username: &str,
        token: &str,
        range: &ResolvedRange,
        debug: bool,
    ) -> Result<ContributionDataset, AppError> {
        let calendar = self.upstream.fetch_calendar(username, token, range).await?;

        // GitHub's total can include activity the calendar omits; keep it as-is.
        let day_sum = calendar.day_sum();
        if day_sum != calendar.total_contributions {
            if debug {
                tracing::info!(
                    username = %username,
                    upstream_total = calendar.total_contributions,
                    day_sum,
                    "Upstream total differs from sum of daily counts"
                );
            } else {
                tracing::debug!(
                    username = %username,
                    upstream_total = calendar.total_contributions,
                    day_sum,
                    "Upstream total differs from sum of daily counts"
                );
            }
        }

        Ok(ContributionDataset::from_calendar(calendar))
    }

    /// Generate one year of mock data ending at `today`.
    pub fn fetch_mock(&self, today: NaiveDate) -> Result<ContributionDataset, AppError> {
        let calendar = self.mock.generate(today)?;
        Ok(ContributionDataset::from_calendar(calendar))
    }
}

fn log_summary(username: &str, mode: DataMode, dataset: &ContributionDataset) {
    tracing::info!(
        username = %username,
        mode = ?mode,
        from = ?dataset.date_range.from,
        to = ?dataset.date_range.to,
        total_days = dataset.date_range.total_days,
        total_contributions = dataset.total_contributions,
        active_days = dataset.summary.active_days,
        "Contribution data summary"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContributionDay;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSource {
        calls: AtomicUsize,
        calendar: ContributionCalendar,
    }

    #[async_trait]
    impl CalendarSource for FixedSource {
        async fn fetch_calendar(
            &self,
            _username: &str,
            _token: &str,
            _range: &ResolvedRange,
        ) -> Result<ContributionCalendar, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.calendar.clone())
        }
    }

    fn service() -> (ContributionService, Arc<FixedSource>) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let days = [4, 0, 2, 2]
            .iter()
            .enumerate()
            .map(|(i, &c)| ContributionDay::new(start + chrono::Days::new(i as u64), c))
            .collect();
        let source = Arc::new(FixedSource {
            calls: AtomicUsize::new(0),
            calendar: ContributionCalendar {
                days,
                total_contributions: 10,
            },
        });
        (ContributionService::new(source.clone()), source)
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 8, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_real_path_derives_fields() {
        let (service, source) = service();
        let params = DateRangeParams::default();
        let request = ContributionRequest {
            username: "octocat",
            mode: DataMode::Real,
            token: Some("token"),
            range: &params,
            debug: true,
        };

        let dataset = service.load(&request, now()).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
        assert_eq!(dataset.total_contributions, 10);
        assert_eq!(dataset.longest_streak, 2);
        assert_eq!(dataset.current_streak, 2);
        assert_eq!(dataset.summary.average_contributions_per_day, 2.0);
    }

    #[tokio::test]
    async fn test_real_path_without_token_is_configuration_error() {
        let (service, source) = service();
        let params = DateRangeParams::default();
        let request = ContributionRequest {
            username: "octocat",
            mode: DataMode::Real,
            token: None,
            range: &params,
            debug: false,
        };

        let err = service.load(&request, now()).await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mock_path_skips_upstream_and_ignores_range() {
        let (service, source) = service();
        let params = DateRangeParams {
            year: Some("1999".to_string()),
            ..Default::default()
        };
        let request = ContributionRequest {
            username: "octocat",
            mode: DataMode::Mock,
            token: None,
            range: &params,
            debug: false,
        };

        let dataset = service.load(&request, now()).await.unwrap();
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(dataset.date_range.to, Some(now().date_naive()));
        assert_eq!(
            dataset.total_contributions,
            dataset.contributions.iter().map(|d| u64::from(d.count)).sum::<u64>()
        );
    }
}
