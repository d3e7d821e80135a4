//! # Stock Purchase Repository
//!
//! Database operations for stock and supply purchases.
//!
//! A purchase's cadence is not stored here: reports look it up in
//! `expense_items` by `primary_description`, so re-defining an item's
//! cadence re-classifies every past purchase under that name.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use crate::repository::{format_date, generate_id, parse_date};
use tapri_core::{Money, ReportRange, StockPurchaseEntry};

#[derive(Debug, sqlx::FromRow)]
struct StockPurchaseRow {
    id: String,
    date: String,
    primary_description: String,
    total_cost_cents: i64,
}

impl StockPurchaseRow {
    fn into_record(self) -> Option<StockPurchaseEntry> {
        let Some(date) = parse_date(&self.date) else {
            warn!(id = %self.id, date = %self.date, "Skipping stock purchase with unreadable date");
            return None;
        };

        Some(StockPurchaseEntry {
            id: self.id,
            date,
            primary_description: self.primary_description,
            total_cost: Money::from_cents(self.total_cost_cents),
        })
    }
}

/// Repository for stock purchase database operations.
#[derive(Debug, Clone)]
pub struct StockPurchaseRepository {
    pool: SqlitePool,
}

impl StockPurchaseRepository {
    /// Creates a new StockPurchaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StockPurchaseRepository { pool }
    }

    /// Builds, validates and stores a new purchase.
    pub async fn create(
        &self,
        date: NaiveDate,
        primary_description: &str,
        total_cost: Money,
    ) -> DbResult<StockPurchaseEntry> {
        let entry = StockPurchaseEntry {
            id: generate_id(),
            date,
            primary_description: primary_description.trim().to_string(),
            total_cost,
        };
        self.insert(&entry).await?;
        Ok(entry)
    }

    /// Stores a purchase.
    pub async fn insert(&self, entry: &StockPurchaseEntry) -> DbResult<()> {
        entry.validate()?;
        debug!(
            id = %entry.id,
            date = %entry.date,
            description = %entry.primary_description,
            "Inserting stock purchase"
        );

        sqlx::query(
            r#"
            INSERT INTO stock_purchases (id, date, primary_description, total_cost_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&entry.id)
        .bind(format_date(entry.date))
        .bind(&entry.primary_description)
        .bind(entry.total_cost.cents())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Purchases dated inside the range, oldest first.
    pub async fn list_between(&self, range: &ReportRange) -> DbResult<Vec<StockPurchaseEntry>> {
        let rows: Vec<StockPurchaseRow> = sqlx::query_as::<_, StockPurchaseRow>(
            r#"
            SELECT id, date, primary_description, total_cost_cents
            FROM stock_purchases
            WHERE date BETWEEN ?1 AND ?2
            ORDER BY date, rowid
            "#,
        )
        .bind(format_date(range.start()))
        .bind(format_date(range.end()))
        .fetch_all(&self.pool)
        .await?;

        debug!(rows = rows.len(), "Loaded stock purchases");

        Ok(rows.into_iter().filter_map(StockPurchaseRow::into_record).collect())
    }

    /// Deletes a purchase by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM stock_purchases WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Stock purchase", id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_create_list_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let stock = db.stock_purchases();

        let rent = stock
            .create(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                "Rent",
                Money::from_cents(310_000),
            )
            .await
            .unwrap();
        stock
            .create(
                NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                "Rent",
                Money::from_cents(310_000),
            )
            .await
            .unwrap();

        let march = ReportRange::parse("2024-03-01", "2024-03-31").unwrap();
        assert_eq!(stock.list_between(&march).await.unwrap(), vec![rent.clone()]);

        stock.delete(&rent.id).await.unwrap();
        assert!(stock.list_between(&march).await.unwrap().is_empty());
        assert!(matches!(stock.delete(&rent.id).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_zero_cost_purchase_is_allowed() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let entry = db
            .stock_purchases()
            .create(
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
                "Donated cups",
                Money::zero(),
            )
            .await
            .unwrap();
        assert!(entry.total_cost.is_zero());
    }
}
