//! Command line definition.

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tapri_core::dates::parse_report_date;
use tapri_core::validation::{parse_amount, validate_product_name, validate_quantity};
use tapri_core::Cadence;

#[derive(Debug, Parser)]
#[command(name = "tapri", version, about = "Billing, expenses and profit reports for a tea stall.")]
pub struct Cli {
    /// SQLite database file (overrides TAPRI_DB_PATH)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the sales, expense and profit report for a date range.
    Report {
        /// First day, YYYY-MM-DD
        #[arg(long)]
        from: String,
        /// Last day (inclusive), YYYY-MM-DD; defaults to --from
        #[arg(long)]
        to: Option<String>,
        /// Number of best sellers to list
        #[arg(long)]
        top: Option<usize>,
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Record an invoice.
    Bill {
        /// Invoice number (default: next free number)
        #[arg(long)]
        invoice: Option<i64>,
        /// Billing time, "YYYY-MM-DD HH:MM" (default: now)
        #[arg(long, value_parser = parse_billing_time)]
        at: Option<NaiveDateTime>,
        /// Line as NAME:QTY:UNIT_PRICE:UNIT_PROFIT, e.g. "Masala Chai:2:20:11"
        #[arg(long = "item", required = true, value_parser = parse_bill_item)]
        items: Vec<BillItem>,
    },
    /// Log a daily expense.
    Expense {
        /// Day of the expense, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        #[arg(long)]
        description: String,
        /// Amount, e.g. 450 or 1,250.50
        #[arg(long)]
        amount: String,
    },
    /// Record a stock or supply purchase.
    Purchase {
        /// Day of the purchase, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_day)]
        date: Option<NaiveDate>,
        /// Expense item name; decides daily vs monthly treatment
        #[arg(long)]
        description: String,
        /// Total cost, e.g. 15000
        #[arg(long)]
        cost: String,
    },
    /// Define whether purchases under a name are daily or monthly.
    ExpenseItem {
        #[arg(long)]
        name: String,
        #[arg(long, value_parser = parse_cadence)]
        cadence: Cadence,
    },
    /// List expense item definitions.
    ExpenseItems,
}

/// One `--item` argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillItem {
    pub name: String,
    pub quantity: i64,
    /// Per unit, in paise
    pub unit_price: i64,
    /// Per unit, in paise
    pub unit_profit: i64,
}

/// Parses `NAME:QTY:UNIT_PRICE:UNIT_PROFIT`. The name may itself contain `:`.
pub fn parse_bill_item(input: &str) -> Result<BillItem, String> {
    let mut parts = input.rsplitn(4, ':');
    let (Some(profit), Some(price), Some(qty), Some(name)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err("expected NAME:QTY:UNIT_PRICE:UNIT_PROFIT".to_string());
    };

    let name = name.trim();
    validate_product_name(name).map_err(|e| e.to_string())?;

    let quantity: i64 = qty
        .trim()
        .parse()
        .map_err(|_| format!("quantity '{qty}' is not a whole number"))?;
    validate_quantity(quantity).map_err(|e| e.to_string())?;

    let unit_price = parse_amount("price", price).map_err(|e| e.to_string())?;
    let unit_profit = parse_amount("profit", profit).map_err(|e| e.to_string())?;

    Ok(BillItem {
        name: name.to_string(),
        quantity,
        unit_price,
        unit_profit,
    })
}

fn parse_day(input: &str) -> Result<NaiveDate, String> {
    parse_report_date(input).ok_or_else(|| format!("'{input}' is not a YYYY-MM-DD date"))
}

fn parse_billing_time(input: &str) -> Result<NaiveDateTime, String> {
    let input = input.trim();
    NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S"))
        .map_err(|_| format!("'{input}' is not a \"YYYY-MM-DD HH:MM\" time"))
}

fn parse_cadence(input: &str) -> Result<Cadence, String> {
    input.parse::<Cadence>().map_err(|e| e.to_string())
}
