//! # Report Loader
//!
//! Fetches everything a report over a date range can touch and hands it to
//! the aggregator in `tapri-core`.
//!
//! ## What Gets Loaded
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Report 2024-03-15 ..= 2024-04-10                                       │
//! │                                                                         │
//! │  billed_items     billed_at in  2024-03-15 00:00 .. 2024-04-10 23:59    │
//! │  expenses         date in       2024-03-15 ..= 2024-04-10               │
//! │  stock_purchases  date in       2024-03-01 ..= 2024-04-10               │
//! │                                 ▲                                       │
//! │                                 └─ first day of the start month: a     │
//! │                                    monthly purchase made on 03-01 is   │
//! │                                    still being charged on 03-15        │
//! │  expense_items    all                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use crate::error::DbResult;
use crate::pool::Database;
use tapri_core::dates::first_day_of_month;
use tapri_core::{
    BilledLineItem, ExpenseCategoryDef, ExpenseRecord, ReportAggregator, ReportConfig,
    ReportRange, ReportResult, StockPurchaseEntry,
};

/// Records loaded for one report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInputs {
    pub billed_items: Vec<BilledLineItem>,
    pub expenses: Vec<ExpenseRecord>,
    pub stock_entries: Vec<StockPurchaseEntry>,
    pub expense_item_defs: Vec<ExpenseCategoryDef>,
}

/// Loads report inputs and runs the aggregator.
#[derive(Debug, Clone)]
pub struct ReportLoader {
    db: Database,
}

impl ReportLoader {
    /// Creates a loader over the given database.
    pub fn new(db: Database) -> Self {
        ReportLoader { db }
    }

    /// Fetches the records a report over `range` needs.
    pub async fn load(&self, range: &ReportRange) -> DbResult<ReportInputs> {
        let purchase_window =
            ReportRange::new(first_day_of_month(range.start()), range.end()).unwrap_or(*range);

        let billing = self.db.billing();
        let expenses = self.db.expenses();
        let stock = self.db.stock_purchases();
        let items = self.db.expense_items();

        let (billed_items, expenses, stock_entries, expense_item_defs) = tokio::try_join!(
            billing.list_between(range),
            expenses.list_between(range),
            stock.list_between(&purchase_window),
            items.list_all(),
        )?;

        debug!(
            billed_items = billed_items.len(),
            expenses = expenses.len(),
            stock_entries = stock_entries.len(),
            expense_item_defs = expense_item_defs.len(),
            "Report inputs loaded"
        );

        Ok(ReportInputs {
            billed_items,
            expenses,
            stock_entries,
            expense_item_defs,
        })
    }

    /// Builds the report for `start..=end` (`YYYY-MM-DD`).
    ///
    /// A malformed or inverted range yields the empty report without
    /// touching the database.
    pub async fn generate(
        &self,
        start: &str,
        end: &str,
        config: &ReportConfig,
    ) -> DbResult<ReportResult> {
        match ReportRange::parse(start, end) {
            Some(range) => self.generate_range(&range, config).await,
            None => {
                debug!(start, end, "Unusable report range, skipping queries");
                Ok(ReportResult::empty(config))
            }
        }
    }

    /// Builds the report for an already-parsed range.
    pub async fn generate_range(
        &self,
        range: &ReportRange,
        config: &ReportConfig,
    ) -> DbResult<ReportResult> {
        let inputs = self.load(range).await?;

        let report = ReportAggregator::new(*config).aggregate_range(
            &inputs.billed_items,
            &inputs.expenses,
            &inputs.stock_entries,
            &inputs.expense_item_defs,
            range,
        );

        info!(
            start = %range.start(),
            end = %range.end(),
            total_sales = %report.total_sales,
            total_expenses = %report.total_expenses,
            net_profit = %report.net_profit,
            "Report generated"
        );

        Ok(report)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::generate_id;
    use crate::DbConfig;
    use chrono::NaiveDate;
    use tapri_core::{Cadence, LedgerEntryType, Money};

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn line(invoice: i64, product: &str, qty: i64, price: i64, when: NaiveDate, hour: u32) -> BilledLineItem {
        let at = when.and_hms_opt(hour, 10, 0).unwrap();
        BilledLineItem {
            id: generate_id(),
            invoice_number: invoice,
            product_name: product.to_string(),
            quantity: qty,
            price: Money::from_cents(price),
            profit: Money::from_cents(price / 2),
            date: at,
            timestamp: at,
        }
    }

    async fn seeded() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        db.expense_items()
            .upsert(&ExpenseCategoryDef::new("Rent", Cadence::Monthly))
            .await
            .unwrap();
        db.stock_purchases()
            .create(day(3, 1), "Rent", Money::from_cents(310_000))
            .await
            .unwrap();
        db.stock_purchases()
            .create(day(3, 16), "Sugar", Money::from_cents(8_000))
            .await
            .unwrap();
        db.expenses()
            .create(day(3, 20), "Milk", Money::from_cents(12_000))
            .await
            .unwrap();
        db.billing()
            .insert_invoice(&[
                line(1, "Tea", 2, 4_000, day(3, 15), 9),
                line(1, "Bun", 1, 3_000, day(3, 15), 9),
            ])
            .await
            .unwrap();
        db.billing()
            .insert_line(&line(2, "Tea", 1, 2_000, day(3, 14), 9))
            .await
            .unwrap();

        db
    }

    #[tokio::test]
    async fn test_load_reaches_back_to_month_start_for_purchases() {
        let db = seeded().await;
        let range = ReportRange::parse("2024-03-15", "2024-03-31").unwrap();

        let inputs = db.reports().load(&range).await.unwrap();

        assert_eq!(inputs.billed_items.len(), 2);
        assert_eq!(inputs.expenses.len(), 1);
        assert_eq!(inputs.stock_entries.len(), 2);
        assert_eq!(inputs.expense_item_defs.len(), 1);
    }

    #[tokio::test]
    async fn test_generate_end_to_end() {
        let db = seeded().await;

        let report = db
            .reports()
            .generate("2024-03-15", "2024-03-31", &ReportConfig::default())
            .await
            .unwrap();

        assert_eq!(report.total_sales, Money::from_cents(7_000));
        assert_eq!(report.prorated_monthly_total, Money::from_cents(170_000));
        assert_eq!(report.daily_purchases_total, Money::from_cents(8_000));
        assert_eq!(report.daily_expenses_total, Money::from_cents(12_000));
        assert_eq!(report.total_expenses, Money::from_cents(190_000));
        assert_eq!(report.net_profit, Money::from_cents(7_000 - 190_000));
        assert_eq!(report.orders_at(9), Some(1));
        assert_eq!(report.items_sold[0].product_name, "Tea");

        let monthly_rows = report
            .all_expenses_in_range
            .iter()
            .filter(|r| r.entry_type == LedgerEntryType::Monthly)
            .count();
        assert_eq!(monthly_rows, 17);
    }

    #[tokio::test]
    async fn test_inverted_range_is_empty() {
        let db = seeded().await;
        let config = ReportConfig::default();

        let report = db
            .reports()
            .generate("2024-03-31", "2024-03-01", &config)
            .await
            .unwrap();

        assert_eq!(report, ReportResult::empty(&config));
    }

    #[tokio::test]
    async fn test_matches_in_memory_aggregation() {
        let db = seeded().await;
        let range = ReportRange::parse("2024-03-01", "2024-03-31").unwrap();
        let config = ReportConfig::default();

        let inputs = db.reports().load(&range).await.unwrap();
        let direct = ReportAggregator::new(config).aggregate(
            &inputs.billed_items,
            &inputs.expenses,
            &inputs.stock_entries,
            &inputs.expense_item_defs,
            "2024-03-01",
            "2024-03-31",
        );
        let generated = db.reports().generate_range(&range, &config).await.unwrap();

        assert_eq!(direct, generated);
    }
}
