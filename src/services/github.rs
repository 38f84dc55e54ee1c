// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! GitHub GraphQL client for contribution calendars.
//!
//! One POST per request: no retry, no caching. The nested
//! `weeks → contributionDays` structure is flattened in the order received.

use crate::error::AppError;
use crate::models::{ContributionCalendar, ContributionDay};
use crate::services::contributions::CalendarSource;
use crate::services::date_range::ResolvedRange;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

const USER_AGENT: &str = concat!("devcard-contributions/", env!("CARGO_PKG_VERSION"));

/// GraphQL error type GitHub uses for an unknown login.
const NOT_FOUND_ERROR_TYPE: &str = "NOT_FOUND";

const CONTRIBUTIONS_QUERY: &str = r#"
query($username: String!, $from: DateTime, $to: DateTime) {
  user(login: $username) {
    contributionsCollection(from: $from, to: $to) {
      contributionCalendar {
        totalContributions
        weeks {
          contributionDays {
            date
            contributionCount
          }
        }
      }
    }
  }
}
"#;

/// GitHub GraphQL API client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    graphql_url: String,
}

impl GitHubClient {
    /// Create a client for the given GraphQL endpoint.
    pub fn new(graphql_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            graphql_url: graphql_url.into(),
        }
    }

    /// Check response status and parse the GraphQL envelope.
    async fn check_response_json(
        &self,
        response: reqwest::Response,
    ) -> Result<GraphQlResponse<UserData>, AppError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                detail: format!("HTTP {}: {}", status, body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamUnavailable {
                status: Some(status.as_u16()),
                detail: format!("JSON parse error: {}", e),
            })
    }
}

#[async_trait]
impl CalendarSource for GitHubClient {
    async fn fetch_calendar(
        &self,
        username: &str,
        token: &str,
        range: &ResolvedRange,
    ) -> Result<ContributionCalendar, AppError> {
        if token.is_empty() {
            return Err(AppError::UpstreamUnavailable {
                status: None,
                detail: "no GitHub credential supplied".to_string(),
            });
        }

        let (from, to) = range.query_bounds();
        tracing::info!(username = %username, from = %from, to = %to, "Fetching GitHub contributions");

        let response = self
            .http
            .post(&self.graphql_url)
            .bearer_auth(token)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .json(&build_query_payload(username, &from, &to))
            .send()
            .await
            .map_err(AppError::upstream_transport)?;

        let envelope = self.check_response_json(response).await?;
        let calendar = map_response(username, envelope)?;

        tracing::info!(
            username = %username,
            days = calendar.days.len(),
            total = calendar.total_contributions,
            "GitHub contributions fetched"
        );

        Ok(calendar)
    }
}

/// JSON body for the contributions query.
pub fn build_query_payload(username: &str, from: &str, to: &str) -> serde_json::Value {
    serde_json::json!({
        "query": CONTRIBUTIONS_QUERY,
        "variables": {
            "username": username,
            "from": from,
            "to": to,
        }
    })
}

/// Turn a GraphQL envelope into a flat calendar.
///
/// A null `user` is "not found" unless GitHub attached errors of another
/// type (rate limits, bad credentials), which are reported as upstream failures.
pub fn map_response(
    username: &str,
    envelope: GraphQlResponse<UserData>,
) -> Result<ContributionCalendar, AppError> {
    let errors = envelope.errors.unwrap_or_default();
    let user = envelope.data.and_then(|data| data.user);

    let Some(user) = user else {
        return match errors
            .iter()
            .find(|e| e.error_type.as_deref() != Some(NOT_FOUND_ERROR_TYPE))
        {
            Some(other) => Err(AppError::UpstreamUnavailable {
                status: None,
                detail: format!(
                    "GraphQL error ({}): {}",
                    other.error_type.as_deref().unwrap_or("unknown"),
                    other.message
                ),
            }),
            None => Err(AppError::UserNotFound(username.to_string())),
        };
    };

    if !errors.is_empty() {
        tracing::warn!(
            username = %username,
            errors = errors.len(),
            first = %errors[0].message,
            "GraphQL response carried errors alongside data"
        );
    }

    let calendar = user.contributions_collection.contribution_calendar;
    let days = calendar
        .weeks
        .into_iter()
        .flat_map(|week| week.contribution_days)
        .map(|day| ContributionDay::new(day.date, day.contribution_count))
        .collect();

    Ok(ContributionCalendar {
        days,
        total_contributions: calendar.total_contributions,
    })
}

// ─── GraphQL Payloads ────────────────────────────────────────

/// GraphQL response wrapper.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

/// GraphQL error.
#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    pub user: Option<GitHubUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubUser {
    pub contributions_collection: ContributionsCollection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionsCollection {
    pub contribution_calendar: CalendarPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarPayload {
    pub total_contributions: u64,
    pub weeks: Vec<WeekPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPayload {
    pub contribution_days: Vec<DayPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPayload {
    pub date: NaiveDate,
    pub contribution_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(value: serde_json::Value) -> GraphQlResponse<UserData> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_payload_carries_variables() {
        let payload = build_query_payload("octocat", "2023-01-01T00:00:00Z", "2023-12-31T23:59:59Z");
        assert_eq!(payload["variables"]["username"], "octocat");
        assert_eq!(payload["variables"]["from"], "2023-01-01T00:00:00Z");
        assert_eq!(payload["variables"]["to"], "2023-12-31T23:59:59Z");
        assert!(payload["query"]
            .as_str()
            .unwrap()
            .contains("contributionsCollection(from: $from, to: $to)"));
    }

    #[test]
    fn test_flattens_weeks_in_order() {
        let body = envelope(json!({
            "data": { "user": { "contributionsCollection": { "contributionCalendar": {
                "totalContributions": 99,
                "weeks": [
                    { "contributionDays": [
                        { "date": "2024-01-06", "contributionCount": 0 }
                    ]},
                    { "contributionDays": [
                        { "date": "2024-01-07", "contributionCount": 3 },
                        { "date": "2024-01-08", "contributionCount": 12 }
                    ]}
                ]
            }}}}
        }));

        let calendar = map_response("octocat", body).unwrap();
        let counts: Vec<_> = calendar.days.iter().map(|d| (d.count, d.level)).collect();
        assert_eq!(counts, vec![(0, 0), (3, 2), (12, 4)]);
        assert_eq!(calendar.days[2].date, NaiveDate::from_ymd_opt(2024, 1, 8).unwrap());
        // Upstream total passes through untouched.
        assert_eq!(calendar.total_contributions, 99);
        assert_eq!(calendar.day_sum(), 15);
    }

    #[test]
    fn test_null_user_is_not_found() {
        let body = envelope(json!({
            "data": { "user": null },
            "errors": [{ "type": "NOT_FOUND", "message": "Could not resolve to a User with the login of 'nobody'." }]
        }));
        let err = map_response("nobody", body).unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(login) if login == "nobody"));
    }

    #[test]
    fn test_null_user_without_errors_is_not_found() {
        let err = map_response("ghost", envelope(json!({ "data": { "user": null } }))).unwrap_err();
        assert!(matches!(err, AppError::UserNotFound(_)));
    }

    #[test]
    fn test_other_graphql_error_is_upstream_failure() {
        let body = envelope(json!({
            "data": null,
            "errors": [{ "type": "RATE_LIMITED", "message": "API rate limit exceeded" }]
        }));
        let err = map_response("octocat", body).unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnavailable { status: None, ref detail } if detail.contains("RATE_LIMITED")));
    }
}
