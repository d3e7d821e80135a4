//! Report rendering: report data → terminal tables.
//!
//! Everything here is a pure `&ReportResult → String` function so the
//! output can be tested without a terminal.

use comfy_table::{Cell, CellAlignment, Table};
use tapri_core::{LedgerEntryType, Money, ReportRange, ReportResult};

/// Formats an amount with a currency symbol and thousands separators:
/// `₹1,234.56`, `-₹500.00`.
pub fn money(amount: Money, symbol: &str) -> String {
    let cents = amount.cents().unsigned_abs();
    let major = (cents / 100).to_string();
    let minor = cents % 100;

    let mut grouped = String::with_capacity(major.len() + major.len() / 3);
    for (i, c) in major.chars().enumerate() {
        if i > 0 && (major.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{sign}{symbol}{grouped}.{minor:02}")
}

/// 12-hour clock label for an hour of the day: `5 AM`, `12 PM`, `9 PM`.
pub fn hour_label(hour: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display} {suffix}")
}

fn ledger_type_label(entry_type: LedgerEntryType) -> &'static str {
    match entry_type {
        LedgerEntryType::Daily => "Expense",
        LedgerEntryType::Purchase => "Purchase",
        LedgerEntryType::Monthly => "Monthly share",
    }
}

fn amount_cell(amount: Money, symbol: &str) -> Cell {
    Cell::new(money(amount, symbol)).set_alignment(CellAlignment::Right)
}

/// Totals table.
pub fn format_summary(report: &ReportResult, symbol: &str) -> String {
    let mut table = Table::new();
    table.set_header(vec!["Summary", "Amount"]);

    let rows = [
        ("Total Sales", report.total_sales),
        ("Gross Profit", report.gross_profit),
        ("  Daily Expenses", report.daily_expenses_total),
        ("  Daily Purchases", report.daily_purchases_total),
        ("  Monthly (prorated)", report.prorated_monthly_total),
        ("Total Expenses", report.total_expenses),
        ("Net Profit", report.net_profit),
    ];
    for (label, amount) in rows {
        table.add_row(vec![Cell::new(label), amount_cell(amount, symbol)]);
    }

    table.to_string()
}

/// Best sellers table.
pub fn format_top_items(report: &ReportResult, symbol: &str) -> String {
    if report.top_items_sold.is_empty() {
        return "No items sold in this period.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Item", "Qty", "Sales", "Profit"]);

    for (rank, item) in report.top_items_sold.iter().enumerate() {
        table.add_row(vec![
            Cell::new(rank + 1),
            Cell::new(&item.product_name),
            Cell::new(item.quantity).set_alignment(CellAlignment::Right),
            amount_cell(item.price, symbol),
            amount_cell(item.profit, symbol),
        ]);
    }

    table.to_string()
}

/// Orders-by-hour table with a bar per hour.
pub fn format_orders_by_hour(report: &ReportResult) -> String {
    let peak = report
        .orders_by_time
        .iter()
        .map(|bucket| bucket.orders)
        .max()
        .unwrap_or(0);

    let mut table = Table::new();
    table.set_header(vec!["Hour", "Orders", ""]);

    for bucket in &report.orders_by_time {
        let width = if peak == 0 {
            0
        } else {
            (bucket.orders * 30).div_ceil(peak) as usize
        };
        table.add_row(vec![
            Cell::new(hour_label(bucket.hour)),
            Cell::new(bucket.orders).set_alignment(CellAlignment::Right),
            Cell::new("█".repeat(width)),
        ]);
    }

    table.to_string()
}

/// Itemized expenses, newest first.
pub fn format_ledger(report: &ReportResult, symbol: &str) -> String {
    if report.all_expenses_in_range.is_empty() {
        return "No expenses in this period.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["Date", "Description", "Type", "Amount"]);

    for entry in &report.all_expenses_in_range {
        table.add_row(vec![
            Cell::new(entry.date),
            Cell::new(&entry.description),
            Cell::new(ledger_type_label(entry.entry_type)),
            amount_cell(entry.amount, symbol),
        ]);
    }

    table.to_string()
}

/// The full report as shown by `tapri report`.
pub fn format_report(report: &ReportResult, range: &ReportRange, symbol: &str) -> String {
    let title = if range.start() == range.end() {
        format!("Report for {}", range.start())
    } else {
        format!("Report for {} to {}", range.start(), range.end())
    };

    [
        title,
        format_summary(report, symbol),
        "Top Items".to_string(),
        format_top_items(report, symbol),
        "Orders by Hour".to_string(),
        format_orders_by_hour(report),
        "Expenses".to_string(),
        format_ledger(report, symbol),
    ]
    .join("\n\n")
}
