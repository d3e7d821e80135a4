//! # Report Module
//!
//! Turns the shop's raw records into the dashboard's financial summary for a
//! date range.
//!
//! ## Aggregation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ReportAggregator::aggregate                        │
//! │                                                                         │
//! │  billed lines ──► timestamp filter ──┬──► total_sales / gross_profit   │
//! │                                      ├──► items_sold (by quantity)     │
//! │                                      └──► orders_by_time (per invoice) │
//! │                                                                         │
//! │  expense item defs ──► name → Cadence (missing = Daily)                │
//! │                                │                                        │
//! │  expenses ──► day filter ──────┼──────────────► Daily ledger rows      │
//! │  stock purchases ──┬── Daily ──┴─► day filter ─► Purchase ledger rows  │
//! │                    └── Monthly ──► proration ──► Monthly ledger rows   │
//! │                                                                         │
//! │  total_expenses = daily + prorated       net_profit = sales - expenses │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//! Nothing here returns an error. An inverted or malformed date range gives
//! [`ReportResult::empty`]; a record that falls outside the range simply
//! contributes nothing.
//!
//! ## Boundary Asymmetry
//! Billed lines are compared by timestamp (midnight to 23:59:59.999) while
//! expenses and purchases are compared by calendar day. Both agree for the
//! records the shop actually produces; the distinction is kept because the
//! dashboard's published totals were computed this way.

pub mod memo;
pub mod proration;

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::ops::RangeInclusive;
use tracing::debug;
use ts_rs::TS;

use crate::dates::ReportRange;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{
    BilledLineItem, Cadence, ExpenseCategoryDef, ExpenseLedgerEntry, ExpenseRecord,
    HourlyOrderBucket, ItemSummary, LedgerEntryType, StockPurchaseEntry,
};
use crate::{DEFAULT_CLOSING_HOUR, DEFAULT_OPENING_HOUR, DEFAULT_TOP_ITEMS};

pub use memo::ReportMemo;
pub use proration::MonthlyProration;

// =============================================================================
// Configuration
// =============================================================================

/// Hours of the day shown on the orders-by-time chart.
///
/// Invoices opened outside the window still count toward sales; they are
/// only left off the chart.
///
/// Deserialization goes through [`OperatingHours::new`], so an inverted or
/// out-of-day window is rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RawOperatingHours")]
pub struct OperatingHours {
    start: u32,
    end: u32,
}

/// Unchecked wire form of [`OperatingHours`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOperatingHours {
    start: u32,
    end: u32,
}

impl TryFrom<RawOperatingHours> for OperatingHours {
    type Error = CoreError;

    fn try_from(raw: RawOperatingHours) -> CoreResult<Self> {
        OperatingHours::new(raw.start, raw.end)
    }
}

impl OperatingHours {
    /// Creates a window `start..=end` (24-hour clock).
    ///
    /// ## Example
    /// ```rust
    /// use tapri_core::OperatingHours;
    ///
    /// assert!(OperatingHours::new(5, 21).is_ok());
    /// assert!(OperatingHours::new(22, 5).is_err());
    /// assert!(OperatingHours::new(0, 24).is_err());
    /// ```
    pub fn new(start: u32, end: u32) -> CoreResult<Self> {
        if start > end || end > 23 {
            return Err(CoreError::InvalidOperatingHours { start, end });
        }
        Ok(OperatingHours { start, end })
    }

    /// First charted hour.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last charted hour (inclusive).
    pub fn end(&self) -> u32 {
        self.end
    }

    /// Whether `hour` has a bucket.
    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour <= self.end
    }

    /// Every charted hour, in order.
    pub fn hours(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of buckets on the chart.
    pub fn bucket_count(&self) -> usize {
        (self.end.saturating_sub(self.start) + 1) as usize
    }
}

impl Default for OperatingHours {
    fn default() -> Self {
        OperatingHours {
            start: DEFAULT_OPENING_HOUR,
            end: DEFAULT_CLOSING_HOUR,
        }
    }
}

/// Settings that shape a report without changing its totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportConfig {
    pub operating_hours: OperatingHours,
    /// Length of `top_items_sold`.
    pub top_items_limit: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            operating_hours: OperatingHours::default(),
            top_items_limit: DEFAULT_TOP_ITEMS,
        }
    }
}

// =============================================================================
// Result
// =============================================================================

/// The financial summary of one date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    /// Sum of `price` over billed lines in range.
    pub total_sales: Money,
    /// Sum of `profit` over billed lines in range.
    pub gross_profit: Money,
    /// Logged expenses dated in range.
    pub daily_expenses_total: Money,
    /// Daily-cadence stock purchases dated in range.
    pub daily_purchases_total: Money,
    /// Monthly-cadence purchases, prorated onto the days in range.
    pub prorated_monthly_total: Money,
    /// `daily_expenses_total + daily_purchases_total + prorated_monthly_total`.
    pub total_expenses: Money,
    /// `total_sales - total_expenses`; negative in a slow month.
    pub net_profit: Money,
    /// Every product sold, most units first.
    pub items_sold: Vec<ItemSummary>,
    /// The head of `items_sold`.
    pub top_items_sold: Vec<ItemSummary>,
    /// One bucket per operating hour.
    pub orders_by_time: Vec<HourlyOrderBucket>,
    /// Itemized expenses, newest date first.
    pub all_expenses_in_range: Vec<ExpenseLedgerEntry>,
}

impl ReportResult {
    /// The zero report: no money, no rows, an empty bucket for every hour.
    pub fn empty(config: &ReportConfig) -> Self {
        ReportResult {
            total_sales: Money::zero(),
            gross_profit: Money::zero(),
            daily_expenses_total: Money::zero(),
            daily_purchases_total: Money::zero(),
            prorated_monthly_total: Money::zero(),
            total_expenses: Money::zero(),
            net_profit: Money::zero(),
            items_sold: Vec::new(),
            top_items_sold: Vec::new(),
            orders_by_time: empty_buckets(&config.operating_hours),
            all_expenses_in_range: Vec::new(),
        }
    }

    /// Orders counted in the bucket for `hour`, `None` if the hour has no bucket.
    pub fn orders_at(&self, hour: u32) -> Option<u32> {
        self.orders_by_time
            .iter()
            .find(|bucket| bucket.hour == hour)
            .map(|bucket| bucket.orders)
    }
}

// =============================================================================
// Aggregator
// =============================================================================

/// Computes [`ReportResult`]s. Holds only configuration; every call is
/// independent and side-effect free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportAggregator {
    config: ReportConfig,
}

impl ReportAggregator {
    /// Creates an aggregator with the given settings.
    pub fn new(config: ReportConfig) -> Self {
        ReportAggregator { config }
    }

    /// The settings in use.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Aggregates the records for `start..=end` (`YYYY-MM-DD` strings).
    ///
    /// A malformed or inverted range yields [`ReportResult::empty`].
    pub fn aggregate(
        &self,
        billed_items: &[BilledLineItem],
        expenses: &[ExpenseRecord],
        stock_entries: &[StockPurchaseEntry],
        expense_item_defs: &[ExpenseCategoryDef],
        start_date: &str,
        end_date: &str,
    ) -> ReportResult {
        match ReportRange::parse(start_date, end_date) {
            Some(range) => self.aggregate_range(
                billed_items,
                expenses,
                stock_entries,
                expense_item_defs,
                &range,
            ),
            None => {
                debug!(start_date, end_date, "Unusable report range, returning empty report");
                ReportResult::empty(&self.config)
            }
        }
    }

    /// Aggregates the records for an already-parsed range.
    pub fn aggregate_range(
        &self,
        billed_items: &[BilledLineItem],
        expenses: &[ExpenseRecord],
        stock_entries: &[StockPurchaseEntry],
        expense_item_defs: &[ExpenseCategoryDef],
        range: &ReportRange,
    ) -> ReportResult {
        // Sales side
        let billed: Vec<&BilledLineItem> = billed_items
            .iter()
            .filter(|item| range.contains_timestamp(item.date))
            .collect();

        let total_sales: Money = billed.iter().map(|item| item.price).sum();
        let gross_profit: Money = billed.iter().map(|item| item.profit).sum();

        let items_sold = rank_items(&billed);
        let top_items_sold = items_sold
            .iter()
            .take(self.config.top_items_limit)
            .cloned()
            .collect();
        let orders_by_time = orders_by_hour(&billed, &self.config.operating_hours);

        // Expense side
        let cadences = cadence_lookup(expense_item_defs);
        let cadence_of = |description: &str| -> Cadence {
            cadences.get(description).copied().unwrap_or_default()
        };

        let mut ledger: Vec<ExpenseLedgerEntry> = Vec::new();

        let mut daily_expenses_total = Money::zero();
        for expense in expenses.iter().filter(|e| range.contains_day(e.date)) {
            daily_expenses_total += expense.amount;
            ledger.push(ExpenseLedgerEntry {
                description: expense.description.clone(),
                amount: expense.amount,
                date: expense.date,
                entry_type: LedgerEntryType::Daily,
            });
        }

        let mut daily_purchases_total = Money::zero();
        for entry in stock_entries
            .iter()
            .filter(|s| cadence_of(&s.primary_description) == Cadence::Daily)
            .filter(|s| range.contains_day(s.date))
        {
            daily_purchases_total += entry.total_cost;
            ledger.push(ExpenseLedgerEntry {
                description: entry.primary_description.clone(),
                amount: entry.total_cost,
                date: entry.date,
                entry_type: LedgerEntryType::Purchase,
            });
        }

        let mut prorated_monthly_total = Money::zero();
        let mut prorated_entries = 0usize;
        for proration in stock_entries
            .iter()
            .filter(|s| cadence_of(&s.primary_description) == Cadence::Monthly)
            .filter_map(MonthlyProration::for_entry)
        {
            if proration.overlap(range).is_none() {
                continue;
            }
            prorated_entries += 1;
            prorated_monthly_total += proration.total_in(range);
            ledger.extend(proration.ledger_rows(range));
        }

        // Newest first; rows sharing a date keep their insertion order
        ledger.sort_by(|a, b| b.date.cmp(&a.date));

        let total_expenses = daily_expenses_total + daily_purchases_total + prorated_monthly_total;

        debug!(
            start = %range.start(),
            end = %range.end(),
            billed_lines = billed.len(),
            prorated_entries,
            ledger_rows = ledger.len(),
            "Report aggregated"
        );

        ReportResult {
            total_sales,
            gross_profit,
            daily_expenses_total,
            daily_purchases_total,
            prorated_monthly_total,
            total_expenses,
            net_profit: total_sales - total_expenses,
            items_sold,
            top_items_sold,
            orders_by_time,
            all_expenses_in_range: ledger,
        }
    }
}

/// Aggregates with the default [`ReportConfig`].
///
/// ## Example
/// ```rust
/// use tapri_core::report::aggregate;
///
/// let report = aggregate(&[], &[], &[], &[], "2024-03-31", "2024-03-01");
/// assert!(report.total_sales.is_zero());
/// assert_eq!(report.orders_by_time.len(), 17);
/// ```
pub fn aggregate(
    billed_items: &[BilledLineItem],
    expenses: &[ExpenseRecord],
    stock_entries: &[StockPurchaseEntry],
    expense_item_defs: &[ExpenseCategoryDef],
    start_date: &str,
    end_date: &str,
) -> ReportResult {
    ReportAggregator::default().aggregate(
        billed_items,
        expenses,
        stock_entries,
        expense_item_defs,
        start_date,
        end_date,
    )
}

// =============================================================================
// Helpers
// =============================================================================

/// Description → cadence. A repeated name keeps the last definition.
fn cadence_lookup(defs: &[ExpenseCategoryDef]) -> HashMap<&str, Cadence> {
    defs.iter()
        .map(|def| (def.name.as_str(), def.category))
        .collect()
}

fn empty_buckets(hours: &OperatingHours) -> Vec<HourlyOrderBucket> {
    let mut buckets = Vec::with_capacity(hours.bucket_count());
    buckets.extend(hours.hours().map(|hour| HourlyOrderBucket { hour, orders: 0 }));
    buckets
}

/// Groups lines by product name and sorts by units sold, descending.
///
/// Ties keep the order in which products were first seen.
fn rank_items(billed: &[&BilledLineItem]) -> Vec<ItemSummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<ItemSummary> = Vec::new();

    for item in billed {
        match index.get(item.product_name.as_str()) {
            Some(&i) => {
                let summary = &mut summaries[i];
                summary.quantity += item.quantity;
                summary.price += item.price;
                summary.profit += item.profit;
            }
            None => {
                index.insert(item.product_name.as_str(), summaries.len());
                summaries.push(ItemSummary {
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    price: item.price,
                    profit: item.profit,
                });
            }
        }
    }

    summaries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    summaries
}

/// Counts each invoice once, at the hour of its first line seen.
fn orders_by_hour(billed: &[&BilledLineItem], hours: &OperatingHours) -> Vec<HourlyOrderBucket> {
    let mut buckets = empty_buckets(hours);
    let mut seen: HashSet<i64> = HashSet::new();
    let mut off_hours = 0usize;

    for item in billed {
        if !seen.insert(item.invoice_number) {
            continue;
        }
        let hour = item.timestamp.hour();
        if hours.contains(hour) {
            buckets[(hour - hours.start()) as usize].orders += 1;
        } else {
            off_hours += 1;
        }
    }

    if off_hours > 0 {
        debug!(off_hours, "Invoices outside operating hours left off the chart");
    }

    buckets
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, s))
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn line(invoice: i64, product: &str, qty: i64, price: i64, profit: i64, when: NaiveDateTime) -> BilledLineItem {
        BilledLineItem {
            id: format!("{invoice}-{product}"),
            invoice_number: invoice,
            product_name: product.to_string(),
            quantity: qty,
            price: Money::from_cents(price),
            profit: Money::from_cents(profit),
            date: when,
            timestamp: when,
        }
    }

    fn expense(on: NaiveDate, description: &str, cents: i64) -> ExpenseRecord {
        ExpenseRecord {
            id: format!("e-{description}-{on}"),
            date: on,
            description: description.to_string(),
            amount: Money::from_cents(cents),
        }
    }

    fn purchase(on: NaiveDate, description: &str, cents: i64) -> StockPurchaseEntry {
        StockPurchaseEntry {
            id: format!("p-{description}-{on}"),
            date: on,
            primary_description: description.to_string(),
            total_cost: Money::from_cents(cents),
        }
    }

    fn rent_defs() -> Vec<ExpenseCategoryDef> {
        vec![ExpenseCategoryDef::new("Rent", Cadence::Monthly)]
    }

    #[test]
    fn test_full_month_scenario() {
        let billed = vec![line(1, "Tea", 1, 10_000, 4_000, at(2024, 3, 1, 9, 15, 0))];
        let stock = vec![purchase(day(2024, 3, 1), "Rent", 310_000)];

        let report = aggregate(&billed, &[], &stock, &rent_defs(), "2024-03-01", "2024-03-31");

        assert_eq!(report.prorated_monthly_total, Money::from_cents(310_000));
        assert_eq!(report.total_sales, Money::from_cents(10_000));
        assert_eq!(report.gross_profit, Money::from_cents(4_000));
        assert_eq!(report.total_expenses, Money::from_cents(310_000));
        assert_eq!(report.net_profit, Money::from_cents(-300_000));
        assert_eq!(report.orders_at(9), Some(1));
        assert_eq!(report.all_expenses_in_range.len(), 31);
        assert!(report
            .all_expenses_in_range
            .iter()
            .all(|row| row.amount == Money::from_cents(10_000)));
    }

    #[test]
    fn test_range_starting_mid_window_scenario() {
        let stock = vec![purchase(day(2024, 3, 1), "Rent", 310_000)];

        let report = aggregate(&[], &[], &stock, &rent_defs(), "2024-03-15", "2024-03-31");

        assert_eq!(report.prorated_monthly_total, Money::from_cents(170_000));
        assert_eq!(report.total_expenses, Money::from_cents(170_000));
        assert_eq!(report.all_expenses_in_range.len(), 17);
        assert_eq!(report.all_expenses_in_range[0].date, day(2024, 3, 31));
        assert_eq!(report.all_expenses_in_range[16].date, day(2024, 3, 15));
    }

    #[test]
    fn test_conservation_for_awkward_cost() {
        let stock = vec![purchase(day(2024, 2, 7), "Rent", 123_457)];

        let report = aggregate(&[], &[], &stock, &rent_defs(), "2024-02-01", "2024-02-29");
        let ledger_sum: Money = report.all_expenses_in_range.iter().map(|r| r.amount).sum();

        assert_eq!(report.prorated_monthly_total, Money::from_cents(123_457));
        assert_eq!(ledger_sum, Money::from_cents(123_457));
        assert_eq!(report.all_expenses_in_range.len(), 23);
    }

    #[test]
    fn test_monthly_cost_never_leaks_into_next_month() {
        let stock = vec![purchase(day(2024, 3, 20), "Rent", 120_000)];

        let report = aggregate(&[], &[], &stock, &rent_defs(), "2024-04-01", "2024-04-30");
        assert!(report.total_expenses.is_zero());
        assert!(report.all_expenses_in_range.is_empty());

        let report = aggregate(&[], &[], &stock, &rent_defs(), "2024-03-01", "2024-03-19");
        assert!(report.total_expenses.is_zero());
    }

    #[test]
    fn test_range_inclusivity() {
        let billed = vec![
            line(1, "Tea", 1, 100, 40, at(2024, 3, 1, 0, 0, 0)),
            line(2, "Tea", 1, 100, 40, at(2024, 3, 31, 23, 59, 59)),
            line(3, "Tea", 1, 100, 40, at(2024, 2, 29, 23, 59, 59)),
            line(4, "Tea", 1, 100, 40, at(2024, 4, 1, 0, 0, 0)),
        ];

        let report = aggregate(&billed, &[], &[], &[], "2024-03-01", "2024-03-31");

        assert_eq!(report.total_sales, Money::from_cents(200));
        assert_eq!(report.items_sold[0].quantity, 2);
    }

    #[test]
    fn test_unknown_description_defaults_to_daily() {
        let stock = vec![
            purchase(day(2024, 3, 10), "Sugar", 45_000),
            purchase(day(2024, 3, 10), "Rent", 220_000),
        ];

        let report = aggregate(&[], &[], &stock, &rent_defs(), "2024-03-10", "2024-03-10");

        assert_eq!(report.daily_purchases_total, Money::from_cents(45_000));
        // March 10..=31 is 22 days
        assert_eq!(report.prorated_monthly_total, Money::from_cents(10_000));
        let sugar: Vec<_> = report
            .all_expenses_in_range
            .iter()
            .filter(|row| row.description == "Sugar")
            .collect();
        assert_eq!(sugar.len(), 1);
        assert_eq!(sugar[0].entry_type, LedgerEntryType::Purchase);
    }

    #[test]
    fn test_duplicate_category_last_definition_wins() {
        let defs = vec![
            ExpenseCategoryDef::new("Gas", Cadence::Monthly),
            ExpenseCategoryDef::new("Gas", Cadence::Daily),
        ];
        let stock = vec![purchase(day(2024, 3, 1), "Gas", 31_000)];

        let report = aggregate(&[], &[], &stock, &defs, "2024-03-01", "2024-03-01");

        assert_eq!(report.daily_purchases_total, Money::from_cents(31_000));
        assert!(report.prorated_monthly_total.is_zero());
    }

    #[test]
    fn test_daily_expenses_use_day_boundaries() {
        let expenses = vec![
            expense(day(2024, 3, 1), "Milk", 5_000),
            expense(day(2024, 3, 31), "Milk", 5_000),
            expense(day(2024, 4, 1), "Milk", 5_000),
        ];

        let report = aggregate(&[], &expenses, &[], &[], "2024-03-01", "2024-03-31");

        assert_eq!(report.daily_expenses_total, Money::from_cents(10_000));
        assert!(report
            .all_expenses_in_range
            .iter()
            .all(|row| row.entry_type == LedgerEntryType::Daily));
    }

    #[test]
    fn test_zero_cost_monthly_entry_adds_no_rows() {
        let stock = vec![purchase(day(2024, 3, 1), "Rent", 0)];

        let report = aggregate(&[], &[], &stock, &rent_defs(), "2024-03-01", "2024-03-31");

        assert!(report.all_expenses_in_range.is_empty());
        assert!(report.total_expenses.is_zero());
    }

    #[test]
    fn test_hour_bucketing_counts_invoices_once() {
        let billed = vec![
            line(1, "Tea", 1, 100, 40, at(2024, 3, 5, 9, 15, 0)),
            line(1, "Bun", 1, 80, 30, at(2024, 3, 5, 9, 16, 0)),
            line(2, "Tea", 1, 100, 40, at(2024, 3, 5, 4, 59, 0)),
            line(3, "Tea", 1, 100, 40, at(2024, 3, 5, 22, 1, 0)),
            line(4, "Tea", 1, 100, 40, at(2024, 3, 5, 21, 1, 0)),
        ];

        let report = aggregate(&billed, &[], &[], &[], "2024-03-05", "2024-03-05");

        assert_eq!(report.orders_by_time.len(), 17);
        assert_eq!(report.orders_at(9), Some(1));
        // 21:01 is clock hour 21, which is inside 5..=21
        assert_eq!(report.orders_at(21), Some(1));
        assert_eq!(report.orders_at(4), None);
        let charted: u32 = report.orders_by_time.iter().map(|b| b.orders).sum();
        assert_eq!(charted, 2);
        // Off-hours invoices still count as sales
        assert_eq!(report.total_sales, Money::from_cents(480));
    }

    #[test]
    fn test_invoice_uses_first_seen_line_hour() {
        let billed = vec![
            line(7, "Tea", 1, 100, 40, at(2024, 3, 5, 10, 59, 0)),
            line(7, "Bun", 1, 80, 30, at(2024, 3, 5, 11, 1, 0)),
        ];

        let report = aggregate(&billed, &[], &[], &[], "2024-03-05", "2024-03-05");

        assert_eq!(report.orders_at(10), Some(1));
        assert_eq!(report.orders_at(11), Some(0));
    }

    #[test]
    fn test_item_ranking_and_top_slice() {
        let when = at(2024, 3, 5, 10, 0, 0);
        let mut billed = vec![
            line(1, "Tea", 3, 300, 120, when),
            line(2, "Coffee", 5, 750, 300, when),
            line(3, "Tea", 4, 400, 160, when),
        ];
        for i in 0..12 {
            billed.push(line(10 + i, &format!("Snack {i}"), 1, 50, 10, when));
        }

        let config = ReportConfig {
            top_items_limit: 10,
            ..ReportConfig::default()
        };
        let report = ReportAggregator::new(config).aggregate(
            &billed,
            &[],
            &[],
            &[],
            "2024-03-05",
            "2024-03-05",
        );

        assert_eq!(report.items_sold.len(), 14);
        assert_eq!(report.top_items_sold.len(), 10);
        assert_eq!(report.items_sold[0].product_name, "Tea");
        assert_eq!(report.items_sold[0].quantity, 7);
        assert_eq!(report.items_sold[0].price, Money::from_cents(700));
        assert_eq!(report.items_sold[1].product_name, "Coffee");
        // Ties keep first-seen order
        assert_eq!(report.items_sold[2].product_name, "Snack 0");
        assert_eq!(report.top_items_sold[..], report.items_sold[..10]);
    }

    #[test]
    fn test_ledger_sorted_newest_first() {
        let expenses = vec![
            expense(day(2024, 3, 2), "Milk", 1_000),
            expense(day(2024, 3, 4), "Gas", 2_000),
        ];
        let stock = vec![
            purchase(day(2024, 3, 3), "Sugar", 3_000),
            purchase(day(2024, 3, 3), "Rent", 2_900),
        ];

        let report = aggregate(&[], &expenses, &stock, &rent_defs(), "2024-03-01", "2024-03-04");

        let dates: Vec<_> = report.all_expenses_in_range.iter().map(|r| r.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
        assert_eq!(dates[0], day(2024, 3, 4));

        // Same-day rows keep source order: daily, purchase, monthly
        let march_third: Vec<_> = report
            .all_expenses_in_range
            .iter()
            .filter(|r| r.date == day(2024, 3, 3))
            .map(|r| r.entry_type)
            .collect();
        assert_eq!(march_third, vec![LedgerEntryType::Purchase, LedgerEntryType::Monthly]);
    }

    #[test]
    fn test_inverted_or_invalid_range_is_empty() {
        let billed = vec![line(1, "Tea", 1, 100, 40, at(2024, 3, 5, 9, 0, 0))];
        let expenses = vec![expense(day(2024, 3, 5), "Milk", 500)];

        let inverted = aggregate(&billed, &expenses, &[], &[], "2024-03-31", "2024-03-01");
        let garbage = aggregate(&billed, &expenses, &[], &[], "not-a-date", "2024-03-31");
        let empty = ReportResult::empty(&ReportConfig::default());

        assert_eq!(inverted, empty);
        assert_eq!(garbage, empty);
        assert!(empty.orders_by_time.iter().all(|b| b.orders == 0));
    }

    #[test]
    fn test_idempotent() {
        let billed = vec![
            line(1, "Tea", 2, 200, 80, at(2024, 3, 5, 9, 0, 0)),
            line(2, "Bun", 1, 80, 30, at(2024, 3, 6, 17, 30, 0)),
        ];
        let expenses = vec![expense(day(2024, 3, 5), "Milk", 500)];
        let stock = vec![purchase(day(2024, 3, 1), "Rent", 310_000)];

        let first = aggregate(&billed, &expenses, &stock, &rent_defs(), "2024-03-01", "2024-03-31");
        let second = aggregate(&billed, &expenses, &stock, &rent_defs(), "2024-03-01", "2024-03-31");

        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_operating_hours() {
        let billed = vec![line(1, "Tea", 1, 100, 40, at(2024, 3, 5, 23, 30, 0))];
        let config = ReportConfig {
            operating_hours: OperatingHours::new(18, 23).unwrap(),
            ..ReportConfig::default()
        };

        let report = ReportAggregator::new(config).aggregate(
            &billed,
            &[],
            &[],
            &[],
            "2024-03-05",
            "2024-03-05",
        );

        assert_eq!(config.operating_hours.bucket_count(), 6);
        assert_eq!(report.orders_by_time.len(), 6);
        assert_eq!(report.orders_at(23), Some(1));
        assert_eq!(OperatingHours::default().bucket_count(), 17);
    }

    #[test]
    fn test_operating_hours_deserialize_validates() {
        let hours: OperatingHours = serde_json::from_str(r#"{"start":6,"end":22}"#).unwrap();
        assert_eq!(hours, OperatingHours::new(6, 22).unwrap());

        assert!(serde_json::from_str::<OperatingHours>(r#"{"start":22,"end":5}"#).is_err());
        assert!(serde_json::from_str::<OperatingHours>(r#"{"start":0,"end":24}"#).is_err());

        let config: ReportConfig = serde_json::from_str(
            r#"{"operatingHours":{"start":5,"end":21},"topItemsLimit":3}"#,
        )
        .unwrap();
        assert_eq!(config.top_items_limit, 3);
        assert!(serde_json::from_str::<ReportConfig>(
            r#"{"operatingHours":{"start":22,"end":5},"topItemsLimit":3}"#,
        )
        .is_err());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = ReportConfig {
            operating_hours: OperatingHours::new(7, 19).unwrap(),
            top_items_limit: 5,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<ReportConfig>(&json).unwrap(), config);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let report = ReportResult::empty(&ReportConfig::default());
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("totalSales").is_some());
        assert!(json.get("topItemsSold").is_some());
        assert!(json.get("ordersByTime").is_some());
        assert!(json.get("allExpensesInRange").is_some());
        assert_eq!(json["ordersByTime"][0]["hour"], 5);
    }
}
