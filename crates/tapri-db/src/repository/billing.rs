//! # Billing Repository
//!
//! Database operations for billed invoice lines.
//!
//! ## Invoice Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Invoice Lifecycle                                 │
//! │                                                                         │
//! │  1. NUMBER                                                             │
//! │     └── next_invoice_number() → MAX(invoice_number) + 1                │
//! │                                                                         │
//! │  2. RECORD                                                             │
//! │     └── insert_invoice(lines) → all lines in one transaction           │
//! │                                                                         │
//! │  3. REPORT                                                             │
//! │     └── list_between(range) → lines billed inside the range            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are never updated: the product name, price and profit are frozen
//! at the moment of sale.

use sqlx::{Sqlite, SqlitePool};
use tracing::{debug, warn};

use crate::error::DbResult;
use crate::repository::{format_date, format_timestamp, parse_timestamp};
use tapri_core::{BilledLineItem, Money, ReportRange, ValidationError};

/// Row shape of `billed_items`.
#[derive(Debug, sqlx::FromRow)]
struct BilledItemRow {
    id: String,
    invoice_number: i64,
    product_name: String,
    quantity: i64,
    price_cents: i64,
    profit_cents: i64,
    billed_at: String,
    rung_at: String,
}

impl BilledItemRow {
    /// `None` (with a warning) when a stored timestamp cannot be read.
    fn into_record(self) -> Option<BilledLineItem> {
        let (Some(date), Some(timestamp)) =
            (parse_timestamp(&self.billed_at), parse_timestamp(&self.rung_at))
        else {
            warn!(
                id = %self.id,
                billed_at = %self.billed_at,
                rung_at = %self.rung_at,
                "Skipping billed line with unreadable timestamp"
            );
            return None;
        };

        Some(BilledLineItem {
            id: self.id,
            invoice_number: self.invoice_number,
            product_name: self.product_name,
            quantity: self.quantity,
            price: Money::from_cents(self.price_cents),
            profit: Money::from_cents(self.profit_cents),
            date,
            timestamp,
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT
        id,
        invoice_number,
        product_name,
        quantity,
        price_cents,
        profit_cents,
        billed_at,
        rung_at
    FROM billed_items
"#;

/// Repository for billed line database operations.
#[derive(Debug, Clone)]
pub struct BillingRepository {
    pool: SqlitePool,
}

impl BillingRepository {
    /// Creates a new BillingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillingRepository { pool }
    }

    /// The number the next invoice should use (1 on an empty database).
    pub async fn next_invoice_number(&self) -> DbResult<i64> {
        let next: i64 =
            sqlx::query_scalar("SELECT COALESCE(MAX(invoice_number), 0) + 1 FROM billed_items")
                .fetch_one(&self.pool)
                .await?;

        Ok(next)
    }

    /// Inserts a single line.
    pub async fn insert_line(&self, line: &BilledLineItem) -> DbResult<()> {
        line.validate()?;
        debug!(id = %line.id, invoice_number = line.invoice_number, "Inserting billed line");

        insert_with(&self.pool, line).await
    }

    /// Inserts every line of one invoice atomically.
    ///
    /// ## Rules
    /// - At least one line
    /// - All lines carry the same invoice number
    /// - Every line passes validation before anything is written
    pub async fn insert_invoice(&self, lines: &[BilledLineItem]) -> DbResult<()> {
        let Some(first) = lines.first() else {
            return Err(ValidationError::Required {
                field: "invoice lines".to_string(),
            }
            .into());
        };

        for line in lines {
            line.validate()?;
            if line.invoice_number != first.invoice_number {
                return Err(ValidationError::InvalidFormat {
                    field: "invoice number".to_string(),
                    reason: format!(
                        "lines mix invoices {} and {}",
                        first.invoice_number, line.invoice_number
                    ),
                }
                .into());
            }
        }

        debug!(
            invoice_number = first.invoice_number,
            lines = lines.len(),
            "Inserting invoice"
        );

        let mut tx = self.pool.begin().await?;
        for line in lines {
            insert_with(&mut *tx, line).await?;
        }
        tx.commit().await?;

        Ok(())
    }

    /// All lines of one invoice, in the order they were rung up.
    pub async fn list_for_invoice(&self, invoice_number: i64) -> DbResult<Vec<BilledLineItem>> {
        let sql = format!("{SELECT_COLUMNS} WHERE invoice_number = ?1 ORDER BY rung_at, rowid");

        let rows: Vec<BilledItemRow> = sqlx::query_as::<_, BilledItemRow>(&sql)
            .bind(invoice_number)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().filter_map(BilledItemRow::into_record).collect())
    }

    /// Lines billed from local midnight on the first day through the end of
    /// the last day, oldest first.
    pub async fn list_between(&self, range: &ReportRange) -> DbResult<Vec<BilledLineItem>> {
        let sql = format!(
            "{SELECT_COLUMNS} WHERE billed_at >= ?1 AND billed_at < ?2 ORDER BY rung_at, rowid"
        );
        let from = format_date(range.start());
        // Exclusive upper bound: midnight after the last day
        let until = range
            .end()
            .succ_opt()
            .map(format_date)
            .unwrap_or_else(|| format_timestamp(range.window_end()));

        let rows: Vec<BilledItemRow> = sqlx::query_as::<_, BilledItemRow>(&sql)
            .bind(&from)
            .bind(&until)
            .fetch_all(&self.pool)
            .await?;

        debug!(from = %from, until = %until, rows = rows.len(), "Loaded billed lines");

        Ok(rows.into_iter().filter_map(BilledItemRow::into_record).collect())
    }

    /// Total number of stored lines.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM billed_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_with<'e, E>(executor: E, line: &BilledLineItem) -> DbResult<()>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query(
        r#"
        INSERT INTO billed_items (
            id, invoice_number, product_name, quantity,
            price_cents, profit_cents, billed_at, rung_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&line.id)
    .bind(line.invoice_number)
    .bind(&line.product_name)
    .bind(line.quantity)
    .bind(line.price.cents())
    .bind(line.profit.cents())
    .bind(format_timestamp(line.date))
    .bind(format_timestamp(line.timestamp))
    .execute(executor)
    .await?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::repository::generate_id;
    use crate::{Database, DbConfig};
    use chrono::{NaiveDate, NaiveDateTime};
    use tapri_core::{BilledLineItem, Money, ReportRange};

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .and_then(|date| date.and_hms_opt(h, m, 0))
            .unwrap()
    }

    fn line(invoice: i64, product: &str, when: NaiveDateTime) -> BilledLineItem {
        BilledLineItem {
            id: generate_id(),
            invoice_number: invoice,
            product_name: product.to_string(),
            quantity: 2,
            price: Money::from_cents(4_000),
            profit: Money::from_cents(1_500),
            date: when,
            timestamp: when,
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_next_invoice_number() {
        let db = db().await;
        assert_eq!(db.billing().next_invoice_number().await.unwrap(), 1);

        db.billing()
            .insert_line(&line(41, "Tea", at(5, 9, 0)))
            .await
            .unwrap();
        assert_eq!(db.billing().next_invoice_number().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_insert_invoice_round_trip() {
        let db = db().await;
        let lines = vec![
            line(1, "Tea", at(5, 9, 15)),
            line(1, "Bun Maska", at(5, 9, 16)),
        ];

        db.billing().insert_invoice(&lines).await.unwrap();

        let stored = db.billing().list_for_invoice(1).await.unwrap();
        assert_eq!(stored, lines);
        assert_eq!(db.billing().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_invoice_is_atomic() {
        let db = db().await;
        let good = line(1, "Tea", at(5, 9, 15));
        let mut bad = line(1, "Coffee", at(5, 9, 16));
        // Same ID trips the primary key inside the transaction
        bad.id = good.id.clone();

        let result = db.billing().insert_invoice(&[good, bad]).await;

        assert!(matches!(result, Err(DbError::UniqueViolation { .. })));
        assert_eq!(db.billing().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_invoice_validates_first() {
        let db = db().await;

        assert!(matches!(
            db.billing().insert_invoice(&[]).await,
            Err(DbError::Validation(_))
        ));

        let mixed = vec![line(1, "Tea", at(5, 9, 0)), line(2, "Tea", at(5, 9, 1))];
        assert!(matches!(
            db.billing().insert_invoice(&mixed).await,
            Err(DbError::Validation(_))
        ));

        let mut zero = line(3, "Tea", at(5, 9, 0));
        zero.quantity = 0;
        assert!(matches!(
            db.billing().insert_line(&zero).await,
            Err(DbError::Validation(_))
        ));
        assert_eq!(db.billing().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_between_day_boundaries() {
        let db = db().await;
        let billing = db.billing();
        billing.insert_line(&line(1, "Tea", at(4, 23, 59))).await.unwrap();
        billing.insert_line(&line(2, "Tea", at(5, 0, 0))).await.unwrap();
        billing.insert_line(&line(3, "Tea", at(6, 23, 59))).await.unwrap();
        billing.insert_line(&line(4, "Tea", at(7, 0, 0))).await.unwrap();

        let range = ReportRange::parse("2024-03-05", "2024-03-06").unwrap();
        let lines = billing.list_between(&range).await.unwrap();

        let invoices: Vec<i64> = lines.iter().map(|l| l.invoice_number).collect();
        assert_eq!(invoices, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_unreadable_timestamp_is_skipped() {
        let db = db().await;
        db.billing().insert_line(&line(1, "Tea", at(5, 9, 0))).await.unwrap();
        sqlx::query(
            "INSERT INTO billed_items (id, invoice_number, product_name, quantity, price_cents, profit_cents, billed_at, rung_at)
             VALUES ('bad', 2, 'Tea', 1, 100, 40, '2024-03-05Tgarbage', '2024-03-05Tgarbage')",
        )
        .execute(db.pool())
        .await
        .unwrap();

        let range = ReportRange::parse("2024-03-05", "2024-03-05").unwrap();
        let lines = db.billing().list_between(&range).await.unwrap();

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].invoice_number, 1);
    }
}
