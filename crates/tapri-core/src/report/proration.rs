//! # Monthly Proration
//!
//! Spreads a monthly-cadence stock purchase over the days left in its month.
//!
//! ## How a Purchase is Spread
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rent 3100.00 bought 2024-03-01 (March has 31 days)                     │
//! │                                                                         │
//! │  remaining_days = 31 - 1 + 1 = 31      (purchase day is day 1)          │
//! │  active window  = 2024-03-01 ..= 2024-03-31                             │
//! │  per day        = 3100.00 / 31 = 100.00                                 │
//! │                                                                         │
//! │  Report 2024-03-15 ..= 2024-04-10                                       │
//! │  overlap        = 2024-03-15 ..= 2024-03-31  (17 days)                  │
//! │  contribution   = 17 × 100.00 = 1700.00                                 │
//! │                                                                         │
//! │  Nothing is charged before the purchase or after the month ends.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Daily shares come from [`Money::split_evenly`], so when the cost does not
//! divide evenly the first days carry one extra cent and the whole window
//! still adds up to `total_cost` exactly.

use chrono::{Datelike, NaiveDate};

use crate::dates::{days_in_month, last_day_of_month, ReportRange};
use crate::money::Money;
use crate::types::{ExpenseLedgerEntry, LedgerEntryType, StockPurchaseEntry};

/// The day-by-day schedule of one monthly purchase.
#[derive(Debug, Clone)]
pub struct MonthlyProration<'a> {
    entry: &'a StockPurchaseEntry,
    window: ReportRange,
    shares: Vec<Money>,
}

impl<'a> MonthlyProration<'a> {
    /// Builds the schedule for a purchase, `None` when it costs nothing.
    pub fn for_entry(entry: &'a StockPurchaseEntry) -> Option<Self> {
        if entry.total_cost.is_zero() {
            return None;
        }

        let window = ReportRange::new(entry.date, last_day_of_month(entry.date))?;
        let remaining_days = days_in_month(entry.date) - entry.date.day() + 1;
        let shares = entry.total_cost.split_evenly(remaining_days);

        Some(MonthlyProration {
            entry,
            window,
            shares,
        })
    }

    /// The purchase being spread.
    pub fn entry(&self) -> &StockPurchaseEntry {
        self.entry
    }

    /// Purchase day through the last day of its month.
    pub fn active_window(&self) -> ReportRange {
        self.window
    }

    /// Days the cost is spread over, counting the purchase day.
    pub fn remaining_days(&self) -> u32 {
        self.shares.len() as u32
    }

    /// Share charged on `day`, `None` outside the active window.
    pub fn amount_on(&self, day: NaiveDate) -> Option<Money> {
        if !self.window.contains_day(day) {
            return None;
        }
        let offset = day.signed_duration_since(self.window.start()).num_days();
        usize::try_from(offset)
            .ok()
            .and_then(|i| self.shares.get(i))
            .copied()
    }

    /// Days of `range` this purchase is active on.
    pub fn overlap(&self, range: &ReportRange) -> Option<ReportRange> {
        self.window.intersect(range)
    }

    /// Sum of the daily shares that fall inside `range`.
    pub fn total_in(&self, range: &ReportRange) -> Money {
        let Some(overlap) = self.overlap(range) else {
            return Money::zero();
        };
        let skip = overlap
            .start()
            .signed_duration_since(self.window.start())
            .num_days();
        let skip = usize::try_from(skip).unwrap_or(0);
        let take = usize::try_from(overlap.day_count()).unwrap_or(0);

        self.shares.iter().skip(skip).take(take).sum()
    }

    /// One ledger row per overlapping day.
    ///
    /// Days whose share rounds to zero cents produce no row.
    pub fn ledger_rows(&self, range: &ReportRange) -> Vec<ExpenseLedgerEntry> {
        let Some(overlap) = self.overlap(range) else {
            return Vec::new();
        };

        overlap
            .days()
            .filter_map(|day| {
                let amount = self.amount_on(day)?;
                (!amount.is_zero()).then(|| ExpenseLedgerEntry {
                    description: self.entry.primary_description.clone(),
                    amount,
                    date: day,
                    entry_type: LedgerEntryType::Monthly,
                })
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn purchase(on: NaiveDate, cents: i64) -> StockPurchaseEntry {
        StockPurchaseEntry {
            id: "p1".to_string(),
            date: on,
            primary_description: "Rent".to_string(),
            total_cost: Money::from_cents(cents),
        }
    }

    fn range(start: &str, end: &str) -> ReportRange {
        ReportRange::parse(start, end).unwrap()
    }

    #[test]
    fn test_zero_cost_is_skipped() {
        let entry = purchase(date(2024, 3, 1), 0);
        assert!(MonthlyProration::for_entry(&entry).is_none());
    }

    #[test]
    fn test_full_month_from_first_day() {
        let entry = purchase(date(2024, 3, 1), 310_000);
        let p = MonthlyProration::for_entry(&entry).unwrap();

        assert_eq!(p.remaining_days(), 31);
        assert_eq!(p.amount_on(date(2024, 3, 1)), Some(Money::from_cents(10_000)));
        assert_eq!(p.amount_on(date(2024, 3, 31)), Some(Money::from_cents(10_000)));
        assert_eq!(p.amount_on(date(2024, 4, 1)), None);
        assert_eq!(p.amount_on(date(2024, 2, 29)), None);
        assert_eq!(
            p.total_in(&range("2024-03-01", "2024-03-31")),
            Money::from_cents(310_000)
        );
    }

    #[test]
    fn test_purchase_predates_range() {
        let entry = purchase(date(2024, 3, 1), 310_000);
        let p = MonthlyProration::for_entry(&entry).unwrap();
        let r = range("2024-03-15", "2024-03-31");

        assert_eq!(p.overlap(&r).map(|o| o.day_count()), Some(17));
        assert_eq!(p.total_in(&r), Money::from_cents(170_000));
        assert_eq!(p.ledger_rows(&r).len(), 17);
    }

    #[test]
    fn test_mid_month_purchase_counts_purchase_day() {
        // 30-day April, bought on the 21st: 10 remaining days
        let entry = purchase(date(2024, 4, 21), 50_000);
        let p = MonthlyProration::for_entry(&entry).unwrap();

        assert_eq!(p.remaining_days(), 10);
        assert_eq!(p.amount_on(date(2024, 4, 21)), Some(Money::from_cents(5_000)));
        assert_eq!(p.amount_on(date(2024, 4, 20)), None);
        assert_eq!(
            p.active_window(),
            range("2024-04-21", "2024-04-30")
        );
    }

    #[test]
    fn test_last_day_of_month_purchase() {
        let entry = purchase(date(2024, 1, 31), 12_345);
        let p = MonthlyProration::for_entry(&entry).unwrap();

        assert_eq!(p.remaining_days(), 1);
        assert_eq!(
            p.total_in(&range("2024-01-01", "2024-12-31")),
            Money::from_cents(12_345)
        );
    }

    #[test]
    fn test_leap_february() {
        let entry = purchase(date(2024, 2, 1), 29_000);
        let p = MonthlyProration::for_entry(&entry).unwrap();
        assert_eq!(p.remaining_days(), 29);
        assert_eq!(p.amount_on(date(2024, 2, 29)), Some(Money::from_cents(1_000)));
    }

    #[test]
    fn test_disjoint_range_contributes_nothing() {
        let entry = purchase(date(2024, 3, 10), 100_000);
        let p = MonthlyProration::for_entry(&entry).unwrap();

        let before = range("2024-03-01", "2024-03-09");
        let after = range("2024-04-01", "2024-04-30");

        assert!(p.total_in(&before).is_zero());
        assert!(p.ledger_rows(&before).is_empty());
        assert!(p.total_in(&after).is_zero());
        assert!(p.ledger_rows(&after).is_empty());
    }

    #[test]
    fn test_uneven_split_is_conserved() {
        // 1000.00 over the 3 days of 2024-03-29..=31
        let entry = purchase(date(2024, 3, 29), 100_000);
        let p = MonthlyProration::for_entry(&entry).unwrap();
        let whole = range("2024-03-01", "2024-04-30");

        let rows = p.ledger_rows(&whole);
        let from_rows: Money = rows.iter().map(|r| r.amount).sum();

        assert_eq!(rows.len(), 3);
        assert_eq!(from_rows, Money::from_cents(100_000));
        assert_eq!(p.total_in(&whole), from_rows);
        assert_eq!(rows[0].amount, Money::from_cents(33_334));
    }

    #[test]
    fn test_partial_overlap_matches_rows() {
        let entry = purchase(date(2024, 3, 5), 99_999);
        let p = MonthlyProration::for_entry(&entry).unwrap();
        let r = range("2024-03-10", "2024-03-20");

        let rows = p.ledger_rows(&r);
        let from_rows: Money = rows.iter().map(|r| r.amount).sum();

        assert_eq!(rows.len(), 11);
        assert_eq!(p.total_in(&r), from_rows);
        assert!(rows.iter().all(|row| row.entry_type == LedgerEntryType::Monthly));
        assert!(rows.iter().all(|row| row.description == "Rent"));
    }
}
