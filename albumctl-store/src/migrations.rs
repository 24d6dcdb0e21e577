//! Schema migrations for the album table

use sqlx::PgPool;

use crate::error::Result;

/// Migrations embedded from `albumctl-store/migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply all pending migrations
pub async fn run(pool: &PgPool) -> Result<()> {
    tracing::info!("Running album migrations...");
    MIGRATOR.run(pool).await?;
    tracing::info!("Album migrations complete");
    Ok(())
}
