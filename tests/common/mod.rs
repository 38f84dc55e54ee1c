// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use devcard_contributions::config::Config;
use devcard_contributions::error::AppError;
use devcard_contributions::models::{ContributionCalendar, ContributionDay};
use devcard_contributions::routes::create_router;
use devcard_contributions::services::{CalendarSource, ContributionService, ResolvedRange};
use devcard_contributions::AppState;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// What the fake upstream answers with.
#[allow(dead_code)]
#[derive(Clone)]
pub enum Upstream {
    Calendar(ContributionCalendar),
    NotFound,
    Unavailable(u16),
}

/// In-process stand-in for the GitHub client that records its calls.
pub struct FakeUpstream {
    outcome: Upstream,
    calls: AtomicUsize,
    last_token: Mutex<Option<String>>,
    last_range: Mutex<Option<ResolvedRange>>,
}

#[allow(dead_code)]
impl FakeUpstream {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_token(&self) -> Option<String> {
        self.last_token.lock().unwrap().clone()
    }

    pub fn last_range(&self) -> Option<ResolvedRange> {
        *self.last_range.lock().unwrap()
    }
}

#[async_trait]
impl CalendarSource for FakeUpstream {
    async fn fetch_calendar(
        &self,
        username: &str,
        token: &str,
        range: &ResolvedRange,
    ) -> Result<ContributionCalendar, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_token.lock().unwrap() = Some(token.to_string());
        *self.last_range.lock().unwrap() = Some(*range);

        match &self.outcome {
            Upstream::Calendar(calendar) => Ok(calendar.clone()),
            Upstream::NotFound => Err(AppError::UserNotFound(username.to_string())),
            Upstream::Unavailable(status) => Err(AppError::UpstreamUnavailable {
                status: Some(*status),
                detail: format!("HTTP {}", status),
            }),
        }
    }
}

/// Nine days in January 2023 with counts `[0,1,0,3,4,5,0,0,2]` and an
/// upstream total larger than their sum.
#[allow(dead_code)]
pub fn sample_calendar() -> ContributionCalendar {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let days = [0, 1, 0, 3, 4, 5, 0, 0, 2]
        .iter()
        .enumerate()
        .map(|(i, &count)| ContributionDay::new(start + Days::new(i as u64), count))
        .collect();
    ContributionCalendar {
        days,
        total_contributions: 21,
    }
}

/// Create a test app backed by a fake upstream.
#[allow(dead_code)]
pub fn create_test_app_with(
    config: Config,
    outcome: Upstream,
) -> (axum::Router, Arc<FakeUpstream>) {
    let upstream = Arc::new(FakeUpstream {
        outcome,
        calls: AtomicUsize::new(0),
        last_token: Mutex::new(None),
        last_range: Mutex::new(None),
    });

    let state = Arc::new(AppState {
        config,
        contributions: ContributionService::new(upstream.clone()),
    });

    (create_router(state), upstream)
}

/// Create a test app whose upstream returns [`sample_calendar`].
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<FakeUpstream>) {
    create_test_app_with(Config::test_default(), Upstream::Calendar(sample_calendar()))
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
