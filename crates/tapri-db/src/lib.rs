//! # tapri-db: Database Layer for Tapri POS
//!
//! This crate provides database access for Tapri POS.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Tapri POS Data Flow                              │
//! │                                                                         │
//! │  CLI command (report --from .. --to ..)                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     tapri-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ Billing       │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ Expense       │    │ 001_initial  │  │   │
//! │  │   │               │    │ StockPurchase │    │              │  │   │
//! │  │   │               │    │ ExpenseItem   │    │              │  │   │
//! │  │   └───────▲───────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           │                                                     │   │
//! │  │   ┌───────┴───────┐                                            │   │
//! │  │   │ ReportLoader  │──► tapri_core::ReportAggregator            │   │
//! │  │   └───────────────┘                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//! - [`report`] - Loads report inputs and runs the aggregator
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tapri_core::ReportConfig;
//! use tapri_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/tapri.db")).await?;
//!
//! let report = db
//!     .reports()
//!     .generate("2024-03-01", "2024-03-31", &ReportConfig::default())
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod report;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use report::{ReportInputs, ReportLoader};

// Repository re-exports for convenience
pub use repository::billing::BillingRepository;
pub use repository::expense::ExpenseRepository;
pub use repository::expense_item::ExpenseItemRepository;
pub use repository::stock::StockPurchaseRepository;
pub use repository::generate_id;
