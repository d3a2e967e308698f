//! Database initialization
//!
//! Creates the database file and schema on first run; safe to call again on
//! an existing database (all DDL is `IF NOT EXISTS`).

use crate::Result;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    // Create parent directory if it doesn't exist
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&db_url)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    // Enable foreign keys
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;

    // WAL allows concurrent readers with one writer
    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;

    sqlx::query("PRAGMA busy_timeout = 5000").execute(&pool).await?;

    create_exercise_sets_table(&pool).await?;
    create_exercise_options_table(&pool).await?;

    Ok(pool)
}

/// Create the exercise_sets table
///
/// One row per logged set. Rows are never updated in place; ordering by `id`
/// reproduces insertion order, which is the positional identity records have.
async fn create_exercise_sets_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exercise_sets (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            exercise TEXT NOT NULL,
            date TEXT NOT NULL,
            reps INTEGER NOT NULL,
            weight REAL NOT NULL,
            set_number INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(exercise) > 0),
            CHECK (reps >= 1),
            CHECK (weight >= 0.0),
            CHECK (set_number >= 1)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercise_sets_owner ON exercise_sets(owner)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_exercise_sets_owner_exercise ON exercise_sets(owner, exercise)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the exercise_options table
///
/// The per-owner exercise catalog. Append-only; `id` order is the insertion
/// order the catalog presents.
async fn create_exercise_options_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS exercise_options (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner TEXT NOT NULL,
            name TEXT NOT NULL,
            created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            CHECK (length(name) > 0),
            UNIQUE (owner, name)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_exercise_options_owner ON exercise_options(owner)")
        .execute(pool)
        .await?;

    Ok(())
}
