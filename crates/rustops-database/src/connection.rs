//! Roster store connection and schema checks.

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{info, warn};

use rustops_core::config::DatabaseConfig;
use rustops_core::error::{AppError, ErrorKind};
use rustops_core::result::AppResult;

/// Tables created by the roster migrations.
pub const ROSTER_TABLES: [&str; 3] = ["roster_members", "roster_snapshots", "active_server"];

/// Connection pool for the roster store.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Connect to the roster store.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        info!(
            url = %redact_url(&config.url),
            max_connections = config.max_connections,
            "Connecting to roster store"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect(&config.url)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreFailure,
                    format!("Failed to connect to roster store at {}", redact_url(&config.url)),
                    e,
                )
            })?;

        Ok(Self { pool })
    }

    /// The underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Report which roster tables exist.
    pub async fn schema_status(&self) -> AppResult<SchemaStatus> {
        let mut missing = Vec::new();
        for table in ROSTER_TABLES {
            let present = sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
                .bind(format!("public.{table}"))
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::StoreFailure,
                        format!("Failed to inspect table {table}"),
                        e,
                    )
                })?;
            if !present {
                missing.push(table);
            }
        }
        Ok(SchemaStatus { missing })
    }

    /// Fail with a configuration error unless every roster table exists.
    pub async fn require_schema(&self) -> AppResult<()> {
        let status = self.schema_status().await?;
        if status.is_ready() {
            return Ok(());
        }
        warn!(missing = ?status.missing, "Roster store is not migrated");
        Err(AppError::configuration(format!(
            "roster store is missing tables {} (run `rustops migrate run`)",
            status.missing.join(", ")
        )))
    }

    /// Close all connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// Which roster tables are missing from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaStatus {
    /// Missing table names, in migration order.
    pub missing: Vec<&'static str>,
}

impl SchemaStatus {
    /// Whether every roster table exists.
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Replace the password in a connection URL with `****` for display.
pub fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:****@{host}"),
        None => url.to_string(),
    }
}
