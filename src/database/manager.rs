use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

/// Errors from the catalog store
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A stored row could not be mapped to the domain model
    #[error("Corrupt row: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

pub struct DatabaseManager;

impl DatabaseManager {
    /// Open the connection pool shared by every request
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, DatabaseError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        info!("Created database pool (max {} connections)", max_connections);
        Ok(pool)
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}
