//! # Tapri CLI
//!
//! Command-line front end for Tapri POS: record invoices, expenses and stock
//! purchases, and print the profit report for any date range.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Initialize logging (stderr, RUST_LOG overrides the default filter) │
//! │  2. Parse arguments (clap)                                             │
//! │  3. Load CliConfig from TAPRI_* variables, apply --db                  │
//! │  4. Open the database (creates the file, runs migrations)              │
//! │  5. Run the command                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cli;
mod config;
mod error;
mod render;

use chrono::Local;
use clap::Parser;
use comfy_table::Table;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use tapri_core::report::MonthlyProration;
use tapri_core::validation::parse_amount;
use tapri_core::{
    BilledLineItem, Cadence, ExpenseCategoryDef, Money, ReportRange, ValidationError,
};
use tapri_db::{generate_id, Database, DbConfig};

use crate::cli::{BillItem, Cli, Command};
use crate::config::CliConfig;
use crate::error::CliResult;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Installs the log subscriber on stderr so `--json` output stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=info,tapri=debug,sqlx=warn` - Pool, migration and report detail
/// - Default: warnings only, so skipped rows still surface
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::load()?.with_db_path(cli.db);
    debug!(?config, "Configuration loaded");

    if let Some(parent) = config.db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db = Database::new(DbConfig::new(&config.db_path)).await?;

    let result = match cli.command {
        Command::Report {
            from,
            to,
            top,
            json,
        } => report(&db, &config, &from, to.as_deref(), top, json).await,
        Command::Bill { invoice, at, items } => bill(&db, &config, invoice, at, &items).await,
        Command::Expense {
            date,
            description,
            amount,
        } => expense(&db, &config, date, &description, &amount).await,
        Command::Purchase {
            date,
            description,
            cost,
        } => purchase(&db, &config, date, &description, &cost).await,
        Command::ExpenseItem { name, cadence } => expense_item(&db, &name, cadence).await,
        Command::ExpenseItems => expense_items(&db).await,
    };

    db.close().await;
    result
}

// =============================================================================
// Commands
// =============================================================================

async fn report(
    db: &Database,
    config: &CliConfig,
    from: &str,
    to: Option<&str>,
    top: Option<usize>,
    json: bool,
) -> CliResult<()> {
    let range = ReportRange::parse_strict(from, to.unwrap_or(from))?;

    let mut report_config = config.report;
    if let Some(top) = top {
        report_config.top_items_limit = top;
    }

    let report = db.reports().generate_range(&range, &report_config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{}",
            render::format_report(&report, &range, &config.currency_symbol)
        );
    }

    Ok(())
}

async fn bill(
    db: &Database,
    config: &CliConfig,
    invoice: Option<i64>,
    at: Option<chrono::NaiveDateTime>,
    items: &[BillItem],
) -> CliResult<()> {
    let invoice_number = match invoice {
        Some(number) => number,
        None => db.billing().next_invoice_number().await?,
    };
    let at = at.unwrap_or_else(|| Local::now().naive_local());

    let lines = items
        .iter()
        .map(|item| bill_line(invoice_number, at, item))
        .collect::<Result<Vec<_>, _>>()?;

    db.billing().insert_invoice(&lines).await?;

    let total: Money = lines.iter().map(|line| line.price).sum();
    debug!(invoice_number, lines = lines.len(), total = %total, "Invoice recorded");
    println!(
        "✓ Invoice #{} recorded: {} line(s), total {}",
        invoice_number,
        lines.len(),
        render::money(total, &config.currency_symbol)
    );

    Ok(())
}

fn bill_line(
    invoice_number: i64,
    at: chrono::NaiveDateTime,
    item: &BillItem,
) -> Result<BilledLineItem, ValidationError> {
    let line_total = |field: &str, unit: i64| {
        unit.checked_mul(item.quantity)
            .map(Money::from_cents)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: i64::MAX,
            })
    };

    Ok(BilledLineItem {
        id: generate_id(),
        invoice_number,
        product_name: item.name.clone(),
        quantity: item.quantity,
        price: line_total("price", item.unit_price)?,
        profit: line_total("profit", item.unit_profit)?,
        date: at,
        timestamp: at,
    })
}

async fn expense(
    db: &Database,
    config: &CliConfig,
    date: Option<chrono::NaiveDate>,
    description: &str,
    amount: &str,
) -> CliResult<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let amount = Money::from_cents(parse_amount("amount", amount)?);

    let record = db.expenses().create(date, description, amount).await?;

    println!(
        "✓ Expense recorded: {} {} on {}",
        record.description,
        render::money(record.amount, &config.currency_symbol),
        record.date
    );

    Ok(())
}

async fn purchase(
    db: &Database,
    config: &CliConfig,
    date: Option<chrono::NaiveDate>,
    description: &str,
    cost: &str,
) -> CliResult<()> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    let cost = Money::from_cents(parse_amount("cost", cost)?);

    let entry = db.stock_purchases().create(date, description, cost).await?;
    let cadence = db
        .expense_items()
        .get_by_name(&entry.primary_description)
        .await?
        .map(|def| def.category)
        .unwrap_or_default();

    let treatment = match (cadence, MonthlyProration::for_entry(&entry)) {
        (Cadence::Monthly, Some(proration)) => format!(
            "monthly, spread over {} day(s) from {}",
            proration.remaining_days(),
            entry.date
        ),
        _ => format!("daily, charged on {}", entry.date),
    };

    println!(
        "✓ Purchase recorded: {} {} ({})",
        entry.primary_description,
        render::money(entry.total_cost, &config.currency_symbol),
        treatment
    );

    Ok(())
}

async fn expense_item(db: &Database, name: &str, cadence: Cadence) -> CliResult<()> {
    let def = ExpenseCategoryDef::new(name.trim(), cadence);
    db.expense_items().upsert(&def).await?;

    println!("✓ '{}' is now billed {}", def.name, def.category);
    Ok(())
}

async fn expense_items(db: &Database) -> CliResult<()> {
    let defs = db.expense_items().list_all().await?;

    if defs.is_empty() {
        println!("No expense items defined. Purchases are treated as daily.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Name", "Cadence"]);
    for def in &defs {
        table.add_row(vec![def.name.as_str(), def.category.as_str()]);
    }
    println!("{table}");

    Ok(())
}
