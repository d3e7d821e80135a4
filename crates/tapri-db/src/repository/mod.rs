//! # Repository Module
//!
//! Database repository implementations for Tapri POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.expenses().list_between(&range)                            │
//! │       ▼                                                                 │
//! │  ExpenseRepository                                                     │
//! │  ├── create / insert  (validate, then INSERT)                          │
//! │  ├── list_between     (SELECT, skip rows with bad dates)               │
//! │  └── delete                                                            │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`BillingRepository`](billing::BillingRepository) - Billed invoice lines
//! - [`ExpenseRepository`](expense::ExpenseRepository) - Daily expenses
//! - [`StockPurchaseRepository`](stock::StockPurchaseRepository) - Stock purchases
//! - [`ExpenseItemRepository`](expense_item::ExpenseItemRepository) - Cadence definitions
//!
//! ## Stored Date Format
//! Dates are TEXT so that lexical order is chronological order:
//! timestamps as `2024-03-05T09:15:00.000`, calendar dates as `2024-03-05`.

pub mod billing;
pub mod expense;
pub mod expense_item;
pub mod stock;

use chrono::{NaiveDate, NaiveDateTime};
use tapri_core::dates::DATE_FORMAT;
use uuid::Uuid;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Generates a new record ID.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

pub(crate) fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Accepts the stored format and the space-separated form older rows and
/// hand edits use.
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format_sorts_lexically() {
        let morning = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap();
        let evening = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(21, 0, 0))
            .unwrap();

        let a = format_timestamp(morning);
        let b = format_timestamp(evening);

        assert_eq!(a, "2024-03-05T09:05:00.000");
        assert!(a < b);
        assert!(b.as_str() < "2024-03-06");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(9, 5, 0))
            .unwrap();

        assert_eq!(parse_timestamp("2024-03-05T09:05:00.000"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-05 09:05:00"), Some(expected));
        assert_eq!(parse_timestamp("05/03/2024 9:05"), None);
    }

    #[test]
    fn test_date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(parse_date(&format_date(date)), Some(date));
        assert_eq!(parse_date("2024-02-30"), None);
    }
}
