//! # Expense Repository
//!
//! Database operations for manually logged daily expenses.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::{format_date, generate_id, parse_date};
use tapri_core::{ExpenseRecord, Money, ReportRange};

#[derive(Debug, sqlx::FromRow)]
struct ExpenseRow {
    id: String,
    date: String,
    description: String,
    amount_cents: i64,
}

impl ExpenseRow {
    fn into_record(self) -> Option<ExpenseRecord> {
        let Some(date) = parse_date(&self.date) else {
            warn!(id = %self.id, date = %self.date, "Skipping expense with unreadable date");
            return None;
        };

        Some(ExpenseRecord {
            id: self.id,
            date,
            description: self.description,
            amount: Money::from_cents(self.amount_cents),
        })
    }
}

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Builds, validates and stores a new expense.
    pub async fn create(
        &self,
        date: NaiveDate,
        description: &str,
        amount: Money,
    ) -> DbResult<ExpenseRecord> {
        let expense = ExpenseRecord {
            id: generate_id(),
            date,
            description: description.trim().to_string(),
            amount,
        };
        self.insert(&expense).await?;
        Ok(expense)
    }

    /// Stores an expense.
    pub async fn insert(&self, expense: &ExpenseRecord) -> DbResult<()> {
        expense.validate()?;
        debug!(id = %expense.id, date = %expense.date, amount = %expense.amount, "Inserting expense");

        sqlx::query(
            r#"
            INSERT INTO expenses (id, date, description, amount_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&expense.id)
        .bind(format_date(expense.date))
        .bind(&expense.description)
        .bind(expense.amount.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Expenses dated inside the range, oldest first.
    pub async fn list_between(&self, range: &ReportRange) -> DbResult<Vec<ExpenseRecord>> {
        let rows: Vec<ExpenseRow> = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, date, description, amount_cents
            FROM expenses
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date, rowid
            "#,
        )
        .bind(format_date(range.start()))
        .bind(format_date(range.end()))
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Loaded expenses");

        Ok(rows.into_iter().filter_map(ExpenseRow::into_record).collect())
    }

    /// Deletes an expense by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }
}
