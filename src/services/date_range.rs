// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Resolve request date parameters into a concrete UTC query window.
//!
//! Priority: `year`, then `from`+`to`, then `from` alone (until now), then
//! the default one-year lookback. All inputs are interpreted as UTC; a
//! local-time string without an offset is read as if it were UTC.

use crate::error::AppError;
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Months, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

const DEFAULT_LOOKBACK_MONTHS: u32 = 12;

/// GitHub launched in 2008; no account has contributions before it.
pub const EARLIEST_YEAR: i32 = 2008;

/// Raw, optional range parameters as they arrive on a request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeParams {
    pub year: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Concrete `[from, to]` window for the upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl ResolvedRange {
    /// The two bounds formatted as GraphQL `DateTime` scalars.
    pub fn query_bounds(&self) -> (String, String) {
        (format_utc_rfc3339(self.from), format_utc_rfc3339(self.to))
    }
}

impl DateRangeParams {
    /// Resolve against the supplied clock.
    pub fn resolve(&self, now: DateTime<Utc>) -> Result<ResolvedRange, AppError> {
        let year = non_blank(&self.year);
        let from = non_blank(&self.from);
        let to = non_blank(&self.to);

        let range = match (year, from, to) {
            (Some(year), _, _) => year_range(year)?,
            (None, Some(from), Some(to)) => ResolvedRange {
                from: parse_timestamp("from", from)?,
                to: parse_timestamp("to", to)?,
            },
            (None, Some(from), None) => ResolvedRange {
                from: parse_timestamp("from", from)?,
                to: now,
            },
            // A lone `to` carries no start point; fall back to the default window.
            (None, None, _) => default_range(now)?,
        };

        if range.from > range.to {
            return Err(AppError::Validation(format!(
                "'from' ({}) must not be after 'to' ({})",
                format_utc_rfc3339(range.from),
                format_utc_rfc3339(range.to)
            )));
        }

        Ok(range)
    }
}

/// One year ending at `now`.
pub fn default_range(now: DateTime<Utc>) -> Result<ResolvedRange, AppError> {
    let from = now
        .checked_sub_months(Months::new(DEFAULT_LOOKBACK_MONTHS))
        .ok_or_else(|| anyhow::anyhow!("cannot subtract one year from {now}"))?;
    Ok(ResolvedRange { from, to: now })
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn year_range(raw: &str) -> Result<ResolvedRange, AppError> {
    let invalid = || AppError::InvalidDate {
        field: "year",
        value: raw.to_string(),
    };

    if raw.len() != 4 || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let year: i32 = raw.parse().map_err(|_| invalid())?;
    if year < EARLIEST_YEAR {
        return Err(invalid());
    }

    let from = Utc
        .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .ok_or_else(invalid)?;
    let to = Utc
        .with_ymd_and_hms(year, 12, 31, 23, 59, 59)
        .single()
        .ok_or_else(invalid)?;

    Ok(ResolvedRange { from, to })
}

/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS[.f]` (UTC) and `YYYY-MM-DD` (midnight UTC).
fn parse_timestamp(field: &'static str, raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}
