// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Contribution data endpoints.
//!
//! - `GET /contributions`: token from server config, optional mock mode
//! - `POST /contributions`: token supplied in the JSON body
//! - `HEAD /contributions`: date-range metadata as headers only
//!
//! OPTIONS (CORS preflight) is answered by the router's `CorsLayer`.

use crate::error::{AppError, Result};
use crate::models::ContributionDataset;
use crate::services::{ContributionRequest, DataMode, DateRangeParams};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

pub const X_DATE_FROM: HeaderName = HeaderName::from_static("x-date-from");
pub const X_DATE_TO: HeaderName = HeaderName::from_static("x-date-to");
pub const X_TOTAL_DAYS: HeaderName = HeaderName::from_static("x-total-days");

/// Contribution routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/contributions",
        get(get_contributions)
            .post(post_contributions)
            .head(head_contributions),
    )
}

// ─── Request Parameters ──────────────────────────────────────

/// Query string shared by GET and HEAD.
#[derive(Debug, Deserialize, Validate)]
struct ContributionsQuery {
    /// GitHub logins are at most 39 characters.
    #[validate(length(max = 39))]
    username: Option<String>,
    mock: Option<String>,
    debug: Option<String>,
    year: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

impl ContributionsQuery {
    fn is_mock(&self) -> bool {
        self.mock.as_deref() == Some("true")
    }

    fn is_debug(&self) -> bool {
        self.debug.as_deref() == Some("true")
    }

    fn range(&self) -> DateRangeParams {
        DateRangeParams {
            year: self.year.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
        }
    }
}

/// `year` may arrive as a JSON number or string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YearValue {
    Number(i64),
    Text(String),
}

impl YearValue {
    fn into_string(self) -> String {
        match self {
            YearValue::Number(n) => n.to_string(),
            YearValue::Text(s) => s,
        }
    }
}

/// JSON body for POST.
#[derive(Debug, Deserialize, Validate)]
struct ContributionsBody {
    #[validate(length(max = 39))]
    username: Option<String>,
    token: Option<String>,
    year: Option<YearValue>,
    from: Option<String>,
    to: Option<String>,
}

fn check_fields(input: &impl Validate) -> Result<()> {
    input
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}

/// Trimmed, non-empty value of a required field.
fn required<'a>(value: Option<&'a str>, message: &str) -> Result<&'a str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

/// Shared GET/HEAD flow: validate, pick the data path, build the dataset.
async fn load_from_query(
    state: &AppState,
    params: &ContributionsQuery,
) -> Result<ContributionDataset> {
    let username = required(params.username.as_deref(), "Username is required")?;
    check_fields(params)?;

    let range = params.range();
    let request = ContributionRequest {
        username,
        mode: DataMode::from_mock_flag(params.is_mock()),
        token: state.config.github_token.as_deref(),
        range: &range,
        debug: params.is_debug(),
    };

    state
        .contributions
        .load(&request, chrono::Utc::now())
        .await
}

// ─── Handlers ────────────────────────────────────────────────

/// Contribution data using the server-side token (or mock data).
async fn get_contributions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContributionsQuery>,
) -> Result<Json<ContributionDataset>> {
    tracing::debug!(
        username = ?params.username,
        mock = params.is_mock(),
        year = ?params.year,
        from = ?params.from,
        to = ?params.to,
        "Contributions requested"
    );

    let dataset = load_from_query(&state, &params).await?;
    Ok(Json(dataset))
}

/// Contribution data using a caller-supplied token.
async fn post_contributions(
    State(state): State<Arc<AppState>>,
    body: std::result::Result<Json<ContributionsBody>, JsonRejection>,
) -> Result<Json<ContributionDataset>> {
    // Wrong types, bad JSON or a missing content type are client input errors.
    let Json(body) = body.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    let username = required(body.username.as_deref(), "Username and token are required")?;
    let token = required(body.token.as_deref(), "Username and token are required")?;
    check_fields(&body)?;

    let range = DateRangeParams {
        year: body.year.map(YearValue::into_string),
        from: body.from,
        to: body.to,
    };
    let request = ContributionRequest {
        username,
        mode: DataMode::Real,
        token: Some(token),
        range: &range,
        debug: false,
    };

    let dataset = state
        .contributions
        .load(&request, chrono::Utc::now())
        .await?;
    Ok(Json(dataset))
}

/// Date-range metadata only, as `X-Date-From`, `X-Date-To` and `X-Total-Days`.
///
/// Failures map to the same statuses as GET, without a body.
async fn head_contributions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ContributionsQuery>,
) -> Response {
    let dataset = match load_from_query(&state, &params).await {
        Ok(dataset) => dataset,
        Err(err) => {
            err.log();
            return err.status_code().into_response();
        }
    };

    let range = dataset.date_range;
    let mut headers = HeaderMap::new();
    for (name, date) in [(X_DATE_FROM, range.from), (X_DATE_TO, range.to)] {
        if let Some(date) = date {
            match HeaderValue::from_str(&date.to_string()) {
                Ok(value) => {
                    headers.insert(name, value);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Unrepresentable date header");
                    return StatusCode::INTERNAL_SERVER_ERROR.into_response();
                }
            }
        }
    }
    headers.insert(X_TOTAL_DAYS, HeaderValue::from(range.total_days));

    (StatusCode::OK, headers).into_response()
}
