//! # Seed Data Generator
//!
//! Populates the database with a month of tea-stall activity for development.
//!
//! ## Usage
//! ```bash
//! # Seed the current month
//! cargo run -p tapri-db --bin seed
//!
//! # Seed a specific month
//! cargo run -p tapri-db --bin seed -- --month 2024-03
//!
//! # Specify database path and print the month's report as JSON
//! cargo run -p tapri-db --bin seed -- --db ./data/tapri.db --json
//! ```
//!
//! ## Generated Data
//! - 12-40 invoices per day between 5 AM and 10 PM, 1-3 lines each
//! - Daily expenses: milk every day, gas every fourth day
//! - Stock purchases: sugar and tea leaves weekly (daily cadence),
//!   rent and salary on the 1st (monthly cadence)
//! - Expense items defining Rent and Salary as monthly
//!
//! Values come from a fixed arithmetic sequence, so re-seeding the same
//! month produces the same report.

use chrono::{Datelike, Local, NaiveDate};
use std::env;
use tapri_core::dates::{first_day_of_month, last_day_of_month};
use tapri_core::{
    BilledLineItem, Cadence, ExpenseCategoryDef, Money, ReportConfig, ReportRange,
};
use tapri_db::{generate_id, Database, DbConfig};

/// Menu: (name, price in paise, profit in paise)
const MENU: &[(&str, i64, i64)] = &[
    ("Cutting Chai", 1_500, 800),
    ("Masala Chai", 2_000, 1_100),
    ("Ginger Tea", 2_000, 1_000),
    ("Filter Coffee", 2_500, 1_200),
    ("Bun Maska", 3_000, 1_400),
    ("Samosa", 2_000, 900),
    ("Vada Pav", 2_500, 1_100),
    ("Parle-G", 1_000, 300),
    ("Osmania Biscuit", 1_000, 400),
    ("Lemon Tea", 2_000, 1_200),
    ("Poha", 3_500, 1_600),
    ("Upma", 3_500, 1_500),
];

/// Purchases defined as monthly: (description, cost in paise)
const MONTHLY: &[(&str, i64)] = &[("Rent", 1_500_000), ("Salary", 2_400_000)];

/// Weekly restocks with daily cadence: (description, cost in paise)
const RESTOCK: &[(&str, i64)] = &[("Sugar", 90_000), ("Tea Leaves", 180_000)];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./tapri_dev.db");
    let mut month = first_day_of_month(Local::now().date_naive());
    let mut print_json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--month" | "-m" => {
                if i + 1 < args.len() {
                    let value = format!("{}-01", args[i + 1]);
                    month = NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                        .map_err(|_| format!("--month expects YYYY-MM, got '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--json" => print_json = true,
            "--help" | "-h" => {
                println!("Tapri POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>       Database file path (default: ./tapri_dev.db)");
                println!("  -m, --month <YYYY-MM> Month to fill (default: current month)");
                println!("      --json            Print the month's report as JSON");
                println!("  -h, --help            Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let month_end = last_day_of_month(month);

    println!("🌱 Tapri POS Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Month:    {} ..= {}", month, month_end);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.billing().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} billed lines", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let start = std::time::Instant::now();

    // Cadence definitions
    for (name, _) in MONTHLY {
        db.expense_items()
            .upsert(&ExpenseCategoryDef::new(*name, Cadence::Monthly))
            .await?;
    }
    for (name, _) in RESTOCK {
        db.expense_items()
            .upsert(&ExpenseCategoryDef::new(*name, Cadence::Daily))
            .await?;
    }

    // Monthly purchases on the 1st
    for (description, cost) in MONTHLY {
        db.stock_purchases()
            .create(month, description, Money::from_cents(*cost))
            .await?;
    }

    let mut invoice_number = db.billing().next_invoice_number().await?;
    let mut lines_written = 0usize;
    let mut day = month;

    while day <= month_end {
        let seed = day.day() as usize;

        // Daily expenses
        db.expenses()
            .create(day, "Milk", Money::from_cents(60_000 + (seed as i64 % 5) * 2_000))
            .await?;
        if seed % 4 == 1 {
            db.expenses()
                .create(day, "Gas Cylinder Refill", Money::from_cents(95_000))
                .await?;
        }

        // Weekly restocks
        if day.weekday().num_days_from_monday() == 0 {
            for (description, cost) in RESTOCK {
                db.stock_purchases()
                    .create(day, description, Money::from_cents(*cost))
                    .await?;
            }
        }

        // Invoices
        let invoices = 12 + (seed * 7) % 29;
        for n in 0..invoices {
            let lines = generate_invoice(day, invoice_number, seed * 100 + n);
            lines_written += lines.len();
            db.billing().insert_invoice(&lines).await?;
            invoice_number += 1;
        }

        if seed % 10 == 0 {
            println!("  Seeded through {}...", day);
        }

        match day.succ_opt() {
            Some(next) => day = next,
            None => break,
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} invoices ({} lines) in {:?}",
        invoice_number - 1,
        lines_written,
        elapsed
    );

    // Verify via the report path
    if let Some(range) = ReportRange::new(month, month_end) {
        let report = db
            .reports()
            .generate_range(&range, &ReportConfig::default())
            .await?;

        println!();
        println!("Month summary:");
        println!("  Sales:    {}", report.total_sales);
        println!("  Expenses: {}", report.total_expenses);
        println!("  Net:      {}", report.net_profit);

        if print_json {
            println!();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds the lines of one invoice.
fn generate_invoice(day: NaiveDate, invoice_number: i64, seed: usize) -> Vec<BilledLineItem> {
    // Hours 5..=22; a few late invoices fall off the hourly chart
    let hour = 5 + ((seed * 13) % 18) as u32;
    let minute = ((seed * 17) % 60) as u32;
    let line_count = 1 + seed % 3;

    (0..line_count)
        .filter_map(|k| {
            let (name, price, profit) = MENU[(seed * 5 + k * 3) % MENU.len()];
            let quantity = 1 + ((seed + k) % 3) as i64;
            let at = day.and_hms_opt(hour, minute, k as u32)?;

            Some(BilledLineItem {
                id: generate_id(),
                invoice_number,
                product_name: name.to_string(),
                quantity,
                price: Money::from_cents(price * quantity),
                profit: Money::from_cents(profit * quantity),
                date: at,
                timestamp: at,
            })
        })
        .collect()
}
