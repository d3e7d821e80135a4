//! # Dates Module
//!
//! Report ranges and the calendar arithmetic behind monthly proration.
//!
//! ## Two Kinds of Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Range 2024-03-01 ..= 2024-03-31                                        │
//! │                                                                         │
//! │  Timestamped records (billed lines):                                   │
//! │    2024-03-01 00:00:00.000  ≤  billed_at  ≤  2024-03-31 23:59:59.999   │
//! │                                                                         │
//! │  Dated records (expenses, stock purchases):                            │
//! │    2024-03-01  ≤  date  ≤  2024-03-31                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All day counts are taken on calendar dates, never on elapsed seconds, so
//! a daylight-saving shift cannot turn 17 days into 16.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

use crate::error::{CoreError, CoreResult};

/// Date format accepted for report boundaries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` calendar date, `None` when malformed.
///
/// ## Example
/// ```rust
/// use tapri_core::dates::parse_report_date;
///
/// assert!(parse_report_date("2024-02-29").is_some());
/// assert!(parse_report_date("2023-02-29").is_none());
/// assert!(parse_report_date("yesterday").is_none());
/// ```
pub fn parse_report_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// First day of the month containing `date`.
pub fn first_day_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use tapri_core::dates::last_day_of_month;
///
/// let d = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// assert_eq!(last_day_of_month(d), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// ```
pub fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// Number of days in the month containing `date` (28-31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_day_of_month(date).day()
}

/// Inclusive count of calendar days from `from` to `to`.
///
/// Returns 0 or less when `to` precedes `from`.
pub fn inclusive_day_span(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days() + 1
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| date.and_time(NaiveTime::MIN))
}

// =============================================================================
// Report Range
// =============================================================================

/// A closed, inclusive interval of calendar days.
///
/// Construction guarantees `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ReportRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl ReportRange {
    /// Creates a range, `None` when `start` is after `end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(ReportRange { start, end })
    }

    /// Parses two `YYYY-MM-DD` strings.
    ///
    /// `None` when either date is malformed or the range is inverted. This
    /// is the lenient path the aggregator uses: no range, no data.
    pub fn parse(start: &str, end: &str) -> Option<Self> {
        Self::new(parse_report_date(start)?, parse_report_date(end)?)
    }

    /// Parses two `YYYY-MM-DD` strings, explaining what was wrong.
    ///
    /// ## Example
    /// ```rust
    /// use tapri_core::{CoreError, ReportRange};
    ///
    /// assert!(ReportRange::parse_strict("2024-03-01", "2024-03-31").is_ok());
    /// assert!(matches!(
    ///     ReportRange::parse_strict("2024-03-31", "2024-03-01"),
    ///     Err(CoreError::InvalidDateRange { .. })
    /// ));
    /// ```
    pub fn parse_strict(start: &str, end: &str) -> CoreResult<Self> {
        let start_date = parse_report_date(start).ok_or_else(|| CoreError::InvalidDate {
            field: "start".to_string(),
            value: start.to_string(),
        })?;
        let end_date = parse_report_date(end).ok_or_else(|| CoreError::InvalidDate {
            field: "end".to_string(),
            value: end.to_string(),
        })?;

        Self::new(start_date, end_date).ok_or_else(|| CoreError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// A single-day range.
    pub fn single_day(day: NaiveDate) -> Self {
        ReportRange { start: day, end: day }
    }

    /// First day (inclusive).
    #[inline]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day (inclusive).
    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Local midnight at the start of the first day.
    pub fn window_start(&self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// 23:59:59.999 on the last day.
    pub fn window_end(&self) -> NaiveDateTime {
        end_of_day(self.end)
    }

    /// Timestamp-level membership (billed lines).
    pub fn contains_timestamp(&self, at: NaiveDateTime) -> bool {
        at >= self.window_start() && at <= self.window_end()
    }

    /// Day-level membership (expenses, stock purchases).
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Number of days covered, at least 1.
    pub fn day_count(&self) -> i64 {
        inclusive_day_span(self.start, self.end)
    }

    /// Every day in the range, in order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// The days both ranges cover, `None` when they are disjoint.
    ///
    /// ```text
    /// self:   |------------|
    /// other:        |-----------|
    /// result:       |------|
    /// ```
    pub fn intersect(&self, other: &ReportRange) -> Option<ReportRange> {
        ReportRange::new(self.start.max(other.start), self.end.min(other.end))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
