//! # Domain Types
//!
//! Records kept by the shop and the rows a report is built from.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  RECORDS (persisted by tapri-db, read-only here)                       │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌──────────────────────┐   │
//! │  │ BilledLineItem  │  │  ExpenseRecord  │  │ StockPurchaseEntry   │   │
//! │  │  invoice_number │  │  date           │  │  date                │   │
//! │  │  product_name   │  │  description    │  │  primary_description │──┐│
//! │  │  quantity       │  │  amount         │  │  total_cost          │  ││
//! │  │  price, profit  │  └─────────────────┘  └──────────────────────┘  ││
//! │  │  date,timestamp │                       ┌──────────────────────┐  ││
//! │  └─────────────────┘                       │ ExpenseCategoryDef   │◄─┘│
//! │                                            │  name → Cadence      │   │
//! │                                            └──────────────────────┘   │
//! │                                                                         │
//! │  DERIVED (produced per report, never persisted)                        │
//! │  ItemSummary • HourlyOrderBucket • ExpenseLedgerEntry                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Money Fields
//! `price` and `profit` on a billed line are totals for the whole line,
//! not unit prices.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_amount_cents, validate_description, validate_expense_item_name,
    validate_invoice_number, validate_product_name, validate_quantity, ValidationResult,
};

// =============================================================================
// Cadence
// =============================================================================

/// How often a stock purchase's cost recurs.
///
/// ## Effect on Reports
/// ```text
/// Daily   ──► whole cost lands on the purchase date
/// Monthly ──► cost is spread over the rest of the purchase month
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Cadence {
    /// Charged in full on the day it was bought.
    #[default]
    Daily,
    /// Prorated from the purchase day to the end of its month.
    Monthly,
}

impl Cadence {
    /// Lowercase name as stored and typed on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cadence {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "monthly" => Ok(Cadence::Monthly),
            other => Err(ValidationError::InvalidFormat {
                field: "cadence".to_string(),
                reason: format!("'{other}' is not one of: daily, monthly"),
            }),
        }
    }
}

// =============================================================================
// Billed Line Item
// =============================================================================

/// One sold product line on one invoice.
///
/// Several lines share an `invoice_number`; the hourly order chart counts
/// the invoice once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BilledLineItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Invoice this line belongs to.
    pub invoice_number: i64,

    /// Product name at time of sale (frozen).
    pub product_name: String,

    /// Units sold on this line.
    pub quantity: i64,

    /// Line total charged to the customer.
    pub price: Money,

    /// Line profit (price minus cost of goods).
    pub profit: Money,

    /// When the invoice was billed; drives range filtering.
    #[ts(as = "String")]
    pub date: NaiveDateTime,

    /// When the line was rung up; drives the hour-of-day chart.
    #[ts(as = "String")]
    pub timestamp: NaiveDateTime,
}

impl BilledLineItem {
    /// Checks the line before it is saved.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_invoice_number(self.invoice_number)?;
        validate_product_name(&self.product_name)?;
        validate_quantity(self.quantity)?;
        validate_amount_cents("price", self.price.cents())?;
        Ok(())
    }
}

// =============================================================================
// Expense Record
// =============================================================================

/// A manually logged daily expense (milk top-up, gas cylinder, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
}

impl ExpenseRecord {
    /// Checks the expense before it is saved.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_description(&self.description)?;
        validate_amount_cents("amount", self.amount.cents())?;
        Ok(())
    }
}

// =============================================================================
// Stock Purchase Entry
// =============================================================================

/// A recorded purchase of stock or supplies.
///
/// `primary_description` is the lookup key into the expense item
/// definitions that decide its [`Cadence`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StockPurchaseEntry {
    pub id: String,
    /// Calendar date of the purchase (no time component).
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub primary_description: String,
    pub total_cost: Money,
}

impl StockPurchaseEntry {
    /// Checks the purchase before it is saved.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_description(&self.primary_description)?;
        validate_amount_cents("total cost", self.total_cost.cents())?;
        Ok(())
    }
}

// =============================================================================
// Expense Category Definition
// =============================================================================

/// Maps a purchase description to its billing cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategoryDef {
    pub name: String,
    pub category: Cadence,
}

impl ExpenseCategoryDef {
    /// Creates a definition.
    pub fn new(name: impl Into<String>, category: Cadence) -> Self {
        ExpenseCategoryDef {
            name: name.into(),
            category,
        }
    }

    /// Checks the definition before it is saved.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_expense_item_name(&self.name)
    }
}

// =============================================================================
// Derived: Item Summary
// =============================================================================

/// Sales of one product accumulated over a report range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ItemSummary {
    pub product_name: String,
    pub quantity: i64,
    pub price: Money,
    pub profit: Money,
}

// =============================================================================
// Derived: Hourly Order Bucket
// =============================================================================

/// Number of distinct invoices opened during one hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HourlyOrderBucket {
    /// Hour of day, 0-23 (local time).
    pub hour: u32,
    pub orders: u32,
}

// =============================================================================
// Derived: Expense Ledger Entry
// =============================================================================

/// Where a ledger row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryType {
    /// A logged [`ExpenseRecord`].
    Daily,
    /// A daily-cadence [`StockPurchaseEntry`].
    Purchase,
    /// One day's share of a monthly-cadence purchase.
    Monthly,
}

/// One line of the itemized expense breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseLedgerEntry {
    pub description: String,
    pub amount: Money,
    #[ts(as = "String")]
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub entry_type: LedgerEntryType,
}

// =============================================================================
// Unit Tests
// =============================================================================
