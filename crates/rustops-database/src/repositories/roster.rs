//! Roster member repository implementation.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;
use rustops_core::types::{NewRosterMember, RosterMember};

/// Repository for roster membership rows.
#[derive(Debug, Clone)]
pub struct RosterMemberRepository {
    pool: PgPool,
}

impl RosterMemberRepository {
    /// Create a new roster member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List distinct roster names, alphabetically.
    pub async fn distinct_rosters(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT roster FROM roster_members ORDER BY roster",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::StoreFailure, "Failed to list rosters", e))
    }

    /// Insert a member into a roster.
    pub async fn create(&self, roster: &str, member: &NewRosterMember) -> AppResult<RosterMember> {
        sqlx::query_as::<_, RosterMember>(
            "INSERT INTO roster_members (id, roster, name, platform_id, directory_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::new_v4())
        .bind(roster)
        .bind(&member.name)
        .bind(member.platform_id.as_deref())
        .bind(member.directory_id.as_deref())
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to add roster member", e)
        })
    }

    /// Delete the oldest member of `roster` named `name`.
    ///
    /// Removing the last member also drops the roster's snapshot, so a
    /// roster re-created under the same name starts as never checked.
    pub async fn delete_first_by_name(&self, roster: &str, name: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "DELETE FROM roster_members WHERE id = ( \
                SELECT id FROM roster_members WHERE roster = $1 AND name = $2 \
                ORDER BY created_at ASC LIMIT 1)",
        )
        .bind(roster)
        .bind(name)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to remove roster member", e)
        })?;

        if result.rows_affected() > 0 {
            delete_orphan_snapshot(&mut tx, roster).await?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to commit member removal", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Find a member of `roster` sharing either external ID.
    pub async fn find_by_external_ids(
        &self,
        roster: &str,
        platform_id: Option<&str>,
        directory_id: Option<&str>,
    ) -> AppResult<Option<RosterMember>> {
        if platform_id.is_none() && directory_id.is_none() {
            return Ok(None);
        }

        sqlx::query_as::<_, RosterMember>(
            "SELECT * FROM roster_members WHERE roster = $1 \
             AND ((platform_id IS NOT NULL AND platform_id = $2) \
               OR (directory_id IS NOT NULL AND directory_id = $3)) \
             ORDER BY created_at ASC LIMIT 1",
        )
        .bind(roster)
        .bind(platform_id)
        .bind(directory_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to check for duplicate", e)
        })
    }

    /// List members of a roster in insertion order.
    pub async fn find_by_roster(&self, roster: &str) -> AppResult<Vec<RosterMember>> {
        sqlx::query_as::<_, RosterMember>(
            "SELECT * FROM roster_members WHERE roster = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(roster)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to list roster members", e)
        })
    }

    /// Delete every member and the snapshot of a roster in one transaction.
    pub async fn delete_roster(&self, roster: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to begin transaction", e)
        })?;

        let members = sqlx::query("DELETE FROM roster_members WHERE roster = $1")
            .bind(roster)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreFailure, "Failed to delete roster", e)
            })?;

        let snapshots = sqlx::query("DELETE FROM roster_snapshots WHERE roster = $1")
            .bind(roster)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreFailure, "Failed to delete snapshot", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to commit roster delete", e)
        })?;

        Ok(members.rows_affected() + snapshots.rows_affected() > 0)
    }

    /// Rename a roster's members and snapshot in one transaction.
    ///
    /// Fails with `Conflict` if `new_name` still has members. A snapshot
    /// left under `new_name` without members is discarded first.
    pub async fn rename_roster(&self, old_name: &str, new_name: &str) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to begin transaction", e)
        })?;

        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM roster_members WHERE roster = $1)",
        )
        .bind(new_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::StoreFailure, "Failed to check roster", e))?;
        if taken {
            return Err(AppError::conflict(format!("Roster '{new_name}' already exists")));
        }

        delete_orphan_snapshot(&mut tx, new_name).await?;

        let members = sqlx::query("UPDATE roster_members SET roster = $2 WHERE roster = $1")
            .bind(old_name)
            .bind(new_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreFailure, "Failed to rename roster", e)
            })?;

        sqlx::query("UPDATE roster_snapshots SET roster = $2 WHERE roster = $1")
            .bind(old_name)
            .bind(new_name)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreFailure, "Failed to rename snapshot", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::StoreFailure, "Failed to commit roster rename", e)
        })?;

        Ok(members.rows_affected() > 0)
    }
}

/// Delete the snapshot of `roster` if the roster has no members left.
async fn delete_orphan_snapshot(
    tx: &mut Transaction<'_, Postgres>,
    roster: &str,
) -> AppResult<()> {
    sqlx::query(
        "DELETE FROM roster_snapshots WHERE roster = $1 \
         AND NOT EXISTS (SELECT 1 FROM roster_members WHERE roster = $1)",
    )
    .bind(roster)
    .execute(&mut **tx)
    .await
    .map_err(|e| {
        AppError::with_source(ErrorKind::StoreFailure, "Failed to drop orphaned snapshot", e)
    })?;
    Ok(())
}
