use crate::core::usage::{UsageError, UsageStore};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;

/// Named counters persisted in a single SQLite table.
pub struct SqliteUsageStore {
    pool: Pool<Sqlite>,
}

impl SqliteUsageStore {
    pub async fn new(database_path: &str) -> anyhow::Result<Self> {
        let path_str = database_path.trim_start_matches("sqlite://");
        if !path_str.contains(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let pool = SqlitePoolOptions::new()
            .connect(&format!("sqlite://{}?mode=rwc", path_str))
            .await?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS counters (
                key TEXT PRIMARY KEY,
                value INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl UsageStore for SqliteUsageStore {
    async fn add(&self, key: &str, amount: i64) -> Result<i64, UsageError> {
        let row = sqlx::query(
            r#"
            INSERT INTO counters (key, value)
            VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET
            value = value + excluded.value
            RETURNING value
            "#,
        )
        .bind(key)
        .bind(amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UsageError::StorageError(e.to_string()))?;

        Ok(row.get::<i64, _>(0))
    }

    async fn get(&self, key: &str) -> Result<i64, UsageError> {
        let result = sqlx::query("SELECT value FROM counters WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| UsageError::StorageError(e.to_string()))?;

        Ok(result.map(|row| row.get::<i64, _>(0)).unwrap_or(0))
    }
}
