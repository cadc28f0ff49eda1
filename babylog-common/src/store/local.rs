//! Local embedded store backed by SQLite
//!
//! Single partition (no identity scoping): one logical store per
//! installation. Records are stored as opaque JSON documents keyed by `id`,
//! with a secondary index on `date` for retrieval order.

use crate::schema::{self, LogRecord};
use crate::Result;
use chrono::Utc;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// SQLite-backed record store
pub struct LocalStore {
    pool: SqlitePool,
}

impl LocalStore {
    /// Open (creating if needed) the database at `db_path`.
    pub async fn open(db_path: &Path) -> Result<Self> {
        let newly_created = !db_path.exists();

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

        // WAL allows concurrent readers with one writer
        sqlx::query("PRAGMA journal_mode = WAL")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA busy_timeout = 5000")
            .execute(&pool)
            .await?;

        create_logs_table(&pool).await?;

        Ok(Self { pool })
    }

    /// All records, normalized, ordered by `date` descending.
    pub async fn list(&self) -> Result<Vec<LogRecord>> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT content FROM logs ORDER BY date DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.iter()
            .map(|(content,)| {
                let value: serde_json::Value = serde_json::from_str(content)?;
                Ok(schema::normalize(Some(&value)))
            })
            .collect()
    }

    /// Insert-or-replace keyed by `id`; returns the stored record unchanged.
    pub async fn upsert(&self, record: LogRecord) -> Result<LogRecord> {
        let content = serde_json::to_string(&record)?;
        sqlx::query(
            r#"
            INSERT INTO logs (id, date, content, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                date = excluded.date,
                content = excluded.content,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&record.id)
        .bind(&record.date)
        .bind(&content)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(record)
    }

    /// Delete by `id`; deleting an absent id is success.
    pub async fn remove(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM logs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Store every record under a freshly generated `id` inside one
    /// transaction. A failure partway rolls back the whole batch.
    pub async fn bulk_import(&self, records: Vec<LogRecord>) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let now = Utc::now().to_rfc3339();

        for mut record in records {
            // Fresh id so imports never clobber existing records
            record.id = Uuid::new_v4().to_string();
            let content = serde_json::to_string(&record)?;
            sqlx::query(
                "INSERT INTO logs (id, date, content, updated_at) VALUES (?, ?, ?, ?)",
            )
            .bind(&record.id)
            .bind(&record.date)
            .bind(&content)
            .bind(&now)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

async fn create_logs_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS logs (
            id TEXT PRIMARY KEY,
            date TEXT NOT NULL DEFAULT '',
            content TEXT NOT NULL,
            updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_logs_date ON logs(date)")
        .execute(pool)
        .await?;

    Ok(())
}
