//! Active server repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;
use rustops_core::traits::ActiveServerStore;
use rustops_core::types::ActiveServer;

/// Repository for the single-row active server setting.
#[derive(Debug, Clone)]
pub struct ActiveServerRepository {
    pool: PgPool,
}

impl ActiveServerRepository {
    /// Create a new active server repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActiveServerStore for ActiveServerRepository {
    async fn get(&self) -> AppResult<Option<ActiveServer>> {
        sqlx::query_as::<_, ActiveServer>(
            "SELECT server_id, server_name, set_at FROM active_server WHERE id = 1",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to read active server", e)
        })
    }

    async fn set(&self, server_id: &str, server_name: &str) -> AppResult<ActiveServer> {
        sqlx::query_as::<_, ActiveServer>(
            "INSERT INTO active_server (id, server_id, server_name, set_at) VALUES (1, $1, $2, $3) \
             ON CONFLICT (id) DO UPDATE SET \
                server_id = EXCLUDED.server_id, \
                server_name = EXCLUDED.server_name, \
                set_at = EXCLUDED.set_at \
             RETURNING server_id, server_name, set_at",
        )
        .bind(server_id)
        .bind(server_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to set active server", e)
        })
    }

    async fn clear(&self) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM active_server WHERE id = 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreFailure, "Failed to clear active server", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
