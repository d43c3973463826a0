//! Roster snapshot repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;
use rustops_core::types::RosterSnapshot;

/// Repository for the one-row-per-roster check snapshots.
#[derive(Debug, Clone)]
pub struct RosterSnapshotRepository {
    pool: PgPool,
}

impl RosterSnapshotRepository {
    /// Create a new roster snapshot repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the snapshot of a roster.
    pub async fn find_by_roster(&self, roster: &str) -> AppResult<Option<RosterSnapshot>> {
        sqlx::query_as::<_, RosterSnapshot>("SELECT * FROM roster_snapshots WHERE roster = $1")
            .bind(roster)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::StoreFailure, "Failed to find snapshot", e))
    }

    /// Insert or replace the snapshot of a roster.
    pub async fn upsert(
        &self,
        roster: &str,
        active_count: i32,
        total_count: i32,
        checked_at: DateTime<Utc>,
    ) -> AppResult<()> {
        if active_count > total_count {
            return Err(AppError::store_failure(format!(
                "Snapshot for '{roster}' has more active ({active_count}) than total ({total_count}) members"
            )));
        }

        sqlx::query(
            "INSERT INTO roster_snapshots (roster, active_count, total_count, checked_at) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (roster) DO UPDATE SET \
                active_count = EXCLUDED.active_count, \
                total_count = EXCLUDED.total_count, \
                checked_at = EXCLUDED.checked_at",
        )
        .bind(roster)
        .bind(active_count)
        .bind(total_count)
        .bind(checked_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::StoreFailure, "Failed to upsert snapshot", e))?;

        Ok(())
    }
}
