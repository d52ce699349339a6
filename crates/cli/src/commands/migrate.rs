//! Database migration command.
//!
//! Migration files live in `crates/store/migrations/` and are embedded at
//! build time. The servers never migrate on startup.

use super::{ConnectError, connect};

#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Apply pending migrations.
pub async fn run() -> Result<(), MigrationError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../store/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
