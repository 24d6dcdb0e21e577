//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is created once
//! by the caller and handed to `AlbumRepo` by reference.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::error::{Result, StoreError};

/// Default maximum connections for the pool.
/// Kept low for single-user tooling.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long to wait for a connection before giving up.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Pool tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Duration::from_secs(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }
}

/// Create a PostgreSQL connection pool.
///
/// # Errors
///
/// Returns [`StoreError::Connection`] if the URL is invalid or the first
/// connection cannot be established.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/recordings").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    create_pool_with_options(database_url, PoolSettings::default()).await
}

/// Create a PostgreSQL connection pool with custom options.
pub async fn create_pool_with_options(database_url: &str, settings: PoolSettings) -> Result<PgPool> {
    tracing::debug!(
        max_connections = settings.max_connections,
        acquire_timeout_secs = settings.acquire_timeout.as_secs(),
        "creating connection pool"
    );

    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .acquire_timeout(settings.acquire_timeout)
        .connect(database_url)
        .await
        .map_err(StoreError::connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_small() {
        let settings = PoolSettings::default();
        assert_eq!(settings.max_connections, 5);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn invalid_url_is_connection_error() {
        let err = create_pool("not a database url").await.unwrap_err();
        assert!(matches!(err, StoreError::Connection { .. }));
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p albumctl-store -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&url).await.expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
        pool.close().await;
    }
}
