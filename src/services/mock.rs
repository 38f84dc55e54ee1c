// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Synthetic contribution data for demos and token-less deployments.

use crate::error::AppError;
use crate::models::{ContributionCalendar, ContributionDay};
use chrono::{Months, NaiveDate};
use rand::Rng;

/// Inclusive upper bound for a generated daily count.
pub const MAX_MOCK_COUNT: u32 = 14;

/// Generates one day per date from a year before `today` through `today`.
///
/// The shape (dates) is fixed by `today`; the counts are random.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockGenerator;

impl MockGenerator {
    /// Generate a calendar using the thread-local RNG.
    pub fn generate(&self, today: NaiveDate) -> Result<ContributionCalendar, AppError> {
        self.generate_with_rng(today, &mut rand::thread_rng())
    }

    /// Generate a calendar from an explicit RNG.
    pub fn generate_with_rng<R: Rng>(
        &self,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<ContributionCalendar, AppError> {
        let start = today
            .checked_sub_months(Months::new(12))
            .ok_or_else(|| anyhow::anyhow!("cannot subtract one year from {today}"))?;

        tracing::debug!(from = %start, to = %today, "Generating mock contributions");

        let days = start
            .iter_days()
            .take_while(|date| *date <= today)
            .map(|date| ContributionDay::new(date, rng.gen_range(0..=MAX_MOCK_COUNT)))
            .collect();

        Ok(ContributionCalendar::from_days(days))
    }
}
