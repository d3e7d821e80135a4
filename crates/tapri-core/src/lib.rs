//! # tapri-core: Pure Business Logic for Tapri POS
//!
//! This crate is the **heart** of Tapri POS. It contains the record types,
//! money arithmetic and the reporting dashboard's aggregation as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tapri POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front Ends                                   │   │
//! │  │    Billing ──► Expenses ──► Stock Purchases ──► Report View     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ tapri-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  report   │  │ validation│  │   │
//! │  │   │  Billed   │  │   Money   │  │ Aggregator│  │   rules   │  │   │
//! │  │   │  Expense  │  │   split   │  │ Proration │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    tapri-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records (billed lines, expenses, stock purchases) and report rows
//! - [`money`] - Money type with integer arithmetic
//! - [`dates`] - Report ranges and calendar helpers
//! - [`report`] - The report aggregator, monthly proration and memoisation
//! - [`error`] - Domain error types
//! - [`validation`] - Record entry validation
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tapri_core::report::aggregate;
//! use tapri_core::{Cadence, ExpenseCategoryDef, Money, StockPurchaseEntry};
//!
//! let rent = StockPurchaseEntry {
//!     id: "rent-march".to_string(),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//!     primary_description: "Rent".to_string(),
//!     total_cost: Money::from_cents(310_000),
//! };
//! let defs = vec![ExpenseCategoryDef::new("Rent", Cadence::Monthly)];
//!
//! let report = aggregate(&[], &[], &[rent], &defs, "2024-03-15", "2024-03-31");
//!
//! // 17 days of a 31-day month at 100.00 per day
//! assert_eq!(report.total_expenses, Money::from_cents(170_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod dates;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use dates::ReportRange;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{OperatingHours, ReportAggregator, ReportConfig, ReportResult};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// First hour of the default order-distribution window (5 AM).
pub const DEFAULT_OPENING_HOUR: u32 = 5;

/// Last hour of the default order-distribution window (9 PM, inclusive).
pub const DEFAULT_CLOSING_HOUR: u32 = 21;

/// Number of best sellers exposed as `top_items_sold`.
pub const DEFAULT_TOP_ITEMS: usize = 10;

/// Maximum quantity of a single product on one billed line.
///
/// ## Business Reason
/// Catches typos at the counter (1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
