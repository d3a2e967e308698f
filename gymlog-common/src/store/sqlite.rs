//! SQLite-backed record store
//!
//! Every row is scoped by owner; all queries bind values through parameters,
//! the owner string is never interpolated into SQL.

use crate::catalog::{self, CatalogAdd, DEFAULT_EXERCISES};
use crate::records::{SetRecord, DATE_FORMAT};
use crate::{Error, Result};
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

/// Record store over an `exercise_sets` / `exercise_options` schema
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Wrap an initialized pool (see `db::init_database`)
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn load(&self, owner: &str) -> Result<Vec<SetRecord>> {
        let rows: Vec<(String, String, i64, f64, i64)> = sqlx::query_as(
            "SELECT exercise, date, reps, weight, set_number FROM exercise_sets WHERE owner = ? ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    pub async fn append(&self, owner: &str, records: &[SetRecord]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for record in records {
            sqlx::query(
                r#"
                INSERT INTO exercise_sets (owner, exercise, date, reps, weight, set_number)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(owner)
            .bind(&record.exercise)
            .bind(record.date.format(DATE_FORMAT).to_string())
            .bind(record.reps as i64)
            .bind(record.weight)
            .bind(record.set_number as i64)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    pub async fn delete_at(&self, owner: &str, index: usize) -> Result<()> {
        let ids: Vec<(i64,)> =
            sqlx::query_as("SELECT id FROM exercise_sets WHERE owner = ? ORDER BY id")
                .bind(owner)
                .fetch_all(&self.pool)
                .await?;

        let (id,) = ids
            .get(index)
            .ok_or_else(|| Error::NotFound(format!("no record at index {}", index)))?;

        sqlx::query("DELETE FROM exercise_sets WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn delete_all(&self, owner: &str) -> Result<()> {
        sqlx::query("DELETE FROM exercise_sets WHERE owner = ?")
            .bind(owner)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn catalog(&self, owner: &str) -> Result<Vec<String>> {
        self.seed_catalog_if_empty(owner).await?;

        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT name FROM exercise_options WHERE owner = ? ORDER BY id")
                .bind(owner)
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(|(name,)| name).collect())
    }

    pub async fn catalog_add(&self, owner: &str, name: &str) -> Result<CatalogAdd> {
        let name = catalog::normalize_name(name)?;
        self.seed_catalog_if_empty(owner).await?;

        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM exercise_options WHERE owner = ? AND name = ?)",
        )
        .bind(owner)
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        if exists {
            return Ok(CatalogAdd::AlreadyExists);
        }

        sqlx::query("INSERT INTO exercise_options (owner, name) VALUES (?, ?)")
            .bind(owner)
            .bind(&name)
            .execute(&self.pool)
            .await?;

        Ok(CatalogAdd::Added)
    }

    /// Write the default exercise list the first time an owner's catalog is touched
    async fn seed_catalog_if_empty(&self, owner: &str) -> Result<()> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM exercise_options WHERE owner = ?")
                .bind(owner)
                .fetch_one(&self.pool)
                .await?;

        if count > 0 {
            return Ok(());
        }

        for name in DEFAULT_EXERCISES {
            // INSERT OR IGNORE in case two interactions seed concurrently
            sqlx::query("INSERT OR IGNORE INTO exercise_options (owner, name) VALUES (?, ?)")
                .bind(owner)
                .bind(name)
                .execute(&self.pool)
                .await?;
        }

        info!("Seeded default exercise catalog for owner '{}'", owner);
        Ok(())
    }
}

fn row_to_record((exercise, date, reps, weight, set_number): (String, String, i64, f64, i64)) -> Result<SetRecord> {
    let date = NaiveDate::parse_from_str(&date, DATE_FORMAT)
        .map_err(|_| Error::Internal(format!("stored date '{}' is not ISO-8601", date)))?;
    Ok(SetRecord {
        exercise,
        date,
        reps: reps as u32,
        weight,
        set_number: set_number as u32,
    })
}
