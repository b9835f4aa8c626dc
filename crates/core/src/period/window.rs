//! The calculation window every metric is scoped to.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a window's end date precedes its start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid period: end {end} precedes start {start}")]
pub struct InvalidPeriod {
    /// Requested start date.
    pub start: NaiveDate,
    /// Requested end date.
    pub end: NaiveDate,
}

/// An inclusive date window.
///
/// Both bounds are calendar dates; `days()` counts them inclusively, so a
/// window from the 1st to the 30th spans 30 days. Night-level overlap math
/// treats the day after `end` as the checkout-style exclusive boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

impl Period {
    /// Creates a window, rejecting `end < start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, InvalidPeriod> {
        if end < start {
            return Err(InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Trailing window of `days` total days ending at `latest` (inclusive).
    ///
    /// `days` is clamped to a minimum of 1.
    #[must_use]
    pub fn last_days(days: i64, latest: NaiveDate) -> Self {
        let days = days.max(1);
        Self {
            start: latest - Duration::days(days - 1),
            end: latest,
        }
    }

    /// Start date (inclusive).
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// End date (inclusive).
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// The day after `end`: the exclusive boundary used for night overlap.
    #[must_use]
    pub fn end_exclusive(&self) -> NaiveDate {
        self.end + Duration::days(1)
    }

    /// Number of calendar days in the window, counting both bounds.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Returns true if the given date falls within this window.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// The immediately preceding window of the same length.
    #[must_use]
    pub fn preceding(&self) -> Self {
        let days = self.days();
        Self {
            start: self.start - Duration::days(days),
            end: self.start - Duration::days(1),
        }
    }

    /// The mirror window immediately after this one, same length.
    #[must_use]
    pub fn following(&self) -> Self {
        let days = self.days();
        Self {
            start: self.end + Duration::days(1),
            end: self.end + Duration::days(days),
        }
    }

    /// The same window one year earlier.
    ///
    /// Uses calendar-year subtraction; dates that do not exist in the earlier
    /// year (Feb 29) fall back to 365 days before.
    #[must_use]
    pub fn year_earlier(&self) -> Self {
        let start = shift_year_back(self.start);
        let mut end = shift_year_back(self.end);
        if end < start {
            end = start;
        }
        Self { start, end }
    }

    /// Returns a copy whose start is moved forward to `earliest` when the
    /// window begins before it. The end never moves.
    #[must_use]
    pub fn clamped_to(&self, earliest: NaiveDate) -> Self {
        Self {
            start: self.start.max(earliest).min(self.end),
            end: self.end,
        }
    }
}

fn shift_year_back(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() - 1)
        .unwrap_or_else(|| date - Duration::days(365))
}
