//! # Report Memo
//!
//! Remembers the most recent report so a dashboard that re-renders with the
//! same inputs does not re-aggregate.
//!
//! ```text
//! get_or_compute(inputs) ──► same as last call? ──yes──► cached Arc<ReportResult>
//!                                    │
//!                                    no
//!                                    ▼
//!                            aggregate, replace cache
//! ```
//!
//! Only one entry is kept. Inputs are compared by value, so a memo hit is
//! always the report a fresh aggregation would produce.

use std::sync::Arc;
use tracing::trace;

use super::{ReportAggregator, ReportConfig, ReportResult};
use crate::types::{BilledLineItem, ExpenseCategoryDef, ExpenseRecord, StockPurchaseEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
struct MemoKey {
    billed_items: Vec<BilledLineItem>,
    expenses: Vec<ExpenseRecord>,
    stock_entries: Vec<StockPurchaseEntry>,
    expense_item_defs: Vec<ExpenseCategoryDef>,
    start_date: String,
    end_date: String,
}

impl MemoKey {
    fn matches(
        &self,
        billed_items: &[BilledLineItem],
        expenses: &[ExpenseRecord],
        stock_entries: &[StockPurchaseEntry],
        expense_item_defs: &[ExpenseCategoryDef],
        start_date: &str,
        end_date: &str,
    ) -> bool {
        self.start_date == start_date
            && self.end_date == end_date
            && self.billed_items == billed_items
            && self.expenses == expenses
            && self.stock_entries == stock_entries
            && self.expense_item_defs == expense_item_defs
    }
}

/// Single-entry cache in front of a [`ReportAggregator`].
#[derive(Debug, Default)]
pub struct ReportMemo {
    aggregator: ReportAggregator,
    last: Option<(MemoKey, Arc<ReportResult>)>,
    hits: u64,
    misses: u64,
}

impl ReportMemo {
    /// Creates an empty memo.
    pub fn new(config: ReportConfig) -> Self {
        ReportMemo {
            aggregator: ReportAggregator::new(config),
            last: None,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached report when the inputs are unchanged, otherwise
    /// aggregates and caches the new one.
    pub fn get_or_compute(
        &mut self,
        billed_items: &[BilledLineItem],
        expenses: &[ExpenseRecord],
        stock_entries: &[StockPurchaseEntry],
        expense_item_defs: &[ExpenseCategoryDef],
        start_date: &str,
        end_date: &str,
    ) -> Arc<ReportResult> {
        if let Some((key, result)) = &self.last {
            if key.matches(
                billed_items,
                expenses,
                stock_entries,
                expense_item_defs,
                start_date,
                end_date,
            ) {
                self.hits += 1;
                trace!(start_date, end_date, "Report memo hit");
                return Arc::clone(result);
            }
        }

        self.misses += 1;
        trace!(start_date, end_date, "Report memo miss");

        let result = Arc::new(self.aggregator.aggregate(
            billed_items,
            expenses,
            stock_entries,
            expense_item_defs,
            start_date,
            end_date,
        ));
        let key = MemoKey {
            billed_items: billed_items.to_vec(),
            expenses: expenses.to_vec(),
            stock_entries: stock_entries.to_vec(),
            expense_item_defs: expense_item_defs.to_vec(),
            start_date: start_date.to_string(),
            end_date: end_date.to_string(),
        };
        self.last = Some((key, Arc::clone(&result)));
        result
    }

    /// Settings used for new aggregations.
    pub fn config(&self) -> &ReportConfig {
        self.aggregator.config()
    }

    /// Replaces the settings. A changed config drops the cached report.
    pub fn set_config(&mut self, config: ReportConfig) {
        if *self.aggregator.config() != config {
            self.aggregator = ReportAggregator::new(config);
            self.last = None;
        }
    }

    /// Drops the cached report.
    pub fn clear(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
