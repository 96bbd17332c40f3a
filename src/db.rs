use sqlx::{postgres::PgPoolOptions, Executor, PgPool};
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::games::repository::{GameRepository, PostgresGameRepository};
use crate::players::repository::{PlayerRepository, PostgresPlayerRepository};
use crate::shared::AppError;

const SCHEMA: &str = include_str!("../migrations/0001_init.sql");
const MAX_CONNECTIONS: u32 = 5;

/// Connection pool plus schema bootstrap for the PostgreSQL backend
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    #[instrument(skip(database_url))]
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to connect to database");
                AppError::DatabaseError(e.to_string())
            })?;

        info!("Connected to database");
        Ok(Self { pool })
    }

    /// Creates the tables if they do not exist yet
    #[instrument(skip(self))]
    pub async fn init_schema(&self) -> Result<(), AppError> {
        self.pool.execute(SCHEMA).await.map_err(|e| {
            warn!(error = %e, "Failed to initialise schema");
            AppError::DatabaseError(e.to_string())
        })?;

        info!("Database schema ready");
        Ok(())
    }

    pub fn player_repository(&self) -> Arc<dyn PlayerRepository + Send + Sync> {
        Arc::new(PostgresPlayerRepository::new(self.pool.clone()))
    }

    pub fn game_repository(&self) -> Arc<dyn GameRepository + Send + Sync> {
        Arc::new(PostgresGameRepository::new(self.pool.clone()))
    }
}
