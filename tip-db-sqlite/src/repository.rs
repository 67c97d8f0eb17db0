use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Row, sqlite::SqlitePool};
use tracing::debug;

use tip_core::db::codec::{CUSTOM_TIPS_KEY, decode_custom_tips, encode_custom_tips};
use tip_core::{RepositoryError, TipRepository};

/// SQLite-backed [`TipRepository`].
///
/// Storage is a `kv_store` table; the custom tip set occupies the single
/// row keyed [`CUSTOM_TIPS_KEY`], holding the shared JSON payload. Writes
/// are one-statement upserts, so each save either fully replaces the row or
/// leaves the previous value intact.
#[derive(Debug)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub async fn new(database_url: &str) -> Result<Self, RepositoryError> {
        let pool = SqlitePool::connect(database_url)
            .await
            .map_err(|e| RepositoryError::Connection(e.to_string()))?;
        Ok(Self { pool })
    }

    pub async fn new_with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn run_migrations(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TipRepository for SqliteRepository {
    async fn load_custom_tips(&self) -> Result<Option<Vec<Decimal>>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(CUSTOM_TIPS_KEY)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        let Some(row) = row else {
            debug!("no stored custom tips, fresh install");
            return Ok(None);
        };

        let payload: String = row
            .try_get("value")
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

        decode_custom_tips(&payload).map(Some)
    }

    async fn save_custom_tips(&self, customs: &[Decimal]) -> Result<(), RepositoryError> {
        let payload = encode_custom_tips(customs)?;

        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET
                 value = excluded.value,
                 updated_at = CURRENT_TIMESTAMP",
        )
        .bind(CUSTOM_TIPS_KEY)
        .bind(&payload)
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::Database(e.to_string()))?;

        debug!(payload = %payload, "persisted custom tips");
        Ok(())
    }
}
