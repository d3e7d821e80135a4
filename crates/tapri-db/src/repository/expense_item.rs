//! # Expense Item Repository
//!
//! Stores which purchase descriptions are billed daily and which monthly.
//!
//! ```text
//! expense_items                      stock_purchases
//! ┌──────────┬──────────┐            ┌─────────────────────┐
//! │ name  PK │ category │◄── name ───│ primary_description │
//! │ Rent     │ monthly  │            │ Rent                │
//! │ Milk     │ daily    │            │ Sugar  (no item →   │
//! └──────────┴──────────┘            │         daily)      │
//!                                    └─────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use tapri_core::{Cadence, ExpenseCategoryDef};

#[derive(Debug, sqlx::FromRow)]
struct ExpenseItemRow {
    name: String,
    category: Cadence,
}

impl From<ExpenseItemRow> for ExpenseCategoryDef {
    fn from(row: ExpenseItemRow) -> Self {
        ExpenseCategoryDef::new(row.name, row.category)
    }
}

/// Repository for expense item definitions.
#[derive(Debug, Clone)]
pub struct ExpenseItemRepository {
    pool: SqlitePool,
}

impl ExpenseItemRepository {
    /// Creates a new ExpenseItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseItemRepository { pool }
    }

    /// Defines an item, replacing the cadence if the name already exists.
    pub async fn upsert(&self, def: &ExpenseCategoryDef) -> DbResult<()> {
        def.validate()?;
        debug!(name = %def.name, category = %def.category, "Upserting expense item");

        sqlx::query(
            r#"
            INSERT INTO expense_items (name, category)
            VALUES (?1, ?2)
            ON CONFLICT (name) DO UPDATE SET
                category = excluded.category,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            "#,
        )
        .bind(&def.name)
        .bind(def.category)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Every definition, ordered by name.
    pub async fn list_all(&self) -> DbResult<Vec<ExpenseCategoryDef>> {
        let rows: Vec<ExpenseItemRow> = sqlx::query_as::<_, ExpenseItemRow>(
            "SELECT name, category FROM expense_items ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ExpenseCategoryDef::from).collect())
    }

    /// Looks up one definition by exact name.
    pub async fn get_by_name(&self, name: &str) -> DbResult<Option<ExpenseCategoryDef>> {
        let row: Option<ExpenseItemRow> = sqlx::query_as::<_, ExpenseItemRow>(
            "SELECT name, category FROM expense_items WHERE name = ?1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ExpenseCategoryDef::from))
    }

    /// Removes a definition; purchases under that name fall back to daily.
    pub async fn delete(&self, name: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM expense_items WHERE name = ?1")
            .bind(name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense item", name));
        }

        Ok(())
    }
}
