use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::models::{NewPlayer, PlayerId, PlayerModel, UNKNOWN_PLAYER_NAME};
use crate::shared::AppError;

/// Trait for player repository operations
#[async_trait]
pub trait PlayerRepository {
    /// Stores a new player and returns it with its assigned id.
    /// Fails with `Conflict` when the name is already taken.
    async fn create_player(&self, player: &NewPlayer) -> Result<PlayerModel, AppError>;
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError>;
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerModel>, AppError>;
    async fn delete_player(&self, player_id: PlayerId) -> Result<(), AppError>;

    /// Resolves a display name, falling back to "Unknown" for missing ids
    async fn get_player_name(&self, player_id: PlayerId) -> Result<String, AppError> {
        Ok(self
            .get_player(player_id)
            .await?
            .map(|p| p.name)
            .unwrap_or_else(|| UNKNOWN_PLAYER_NAME.to_string()))
    }
}

#[derive(Debug, Default)]
struct PlayerTable {
    next_id: PlayerId,
    rows: BTreeMap<PlayerId, PlayerModel>,
}

/// In-memory implementation of PlayerRepository for development and testing
pub struct InMemoryPlayerRepository {
    players: Mutex<PlayerTable>,
}

impl Default for InMemoryPlayerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPlayerRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            players: Mutex::new(PlayerTable {
                next_id: 1,
                rows: BTreeMap::new(),
            }),
        }
    }

    /// Returns the current number of players in the repository
    pub fn player_count(&self) -> usize {
        self.players.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl PlayerRepository for InMemoryPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &NewPlayer) -> Result<PlayerModel, AppError> {
        debug!(name = %player.name(), "Creating player in memory");

        let mut table = self.players.lock().unwrap();
        if table.rows.values().any(|p| p.name == player.name()) {
            warn!(name = %player.name(), "Player name already exists in memory");
            return Err(AppError::Conflict(format!(
                "Player {} already exists",
                player.name()
            )));
        }

        let id = table.next_id;
        table.next_id += 1;
        let model = PlayerModel {
            id,
            name: player.name().to_string(),
        };
        table.rows.insert(id, model.clone());

        debug!(player_id = id, "Player created successfully in memory");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let table = self.players.lock().unwrap();
        let mut players: Vec<PlayerModel> = table.rows.values().cloned().collect();
        players.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(player_count = players.len(), "Players listed from memory");
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerModel>, AppError> {
        let table = self.players.lock().unwrap();
        let player = table.rows.get(&player_id).cloned();

        match &player {
            Some(p) => debug!(player_id, name = %p.name, "Player found in memory"),
            None => debug!(player_id, "Player not found in memory"),
        }

        Ok(player)
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: PlayerId) -> Result<(), AppError> {
        debug!(player_id, "Deleting player from memory");

        let mut table = self.players.lock().unwrap();
        if table.rows.remove(&player_id).is_none() {
            warn!(player_id, "Player not found for deletion in memory");
            return Err(AppError::NotFound(format!("Player {} not found", player_id)));
        }

        debug!(player_id, "Player deleted successfully from memory");
        Ok(())
    }
}

/// PostgreSQL implementation of player repository
pub struct PostgresPlayerRepository {
    pool: PgPool,
}

impl PostgresPlayerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PlayerRepository for PostgresPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &NewPlayer) -> Result<PlayerModel, AppError> {
        debug!(name = %player.name(), "Creating player in database");

        let row = sqlx::query("INSERT INTO players (name) VALUES ($1) RETURNING id, name")
            .bind(player.name())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                let duplicate = e
                    .as_database_error()
                    .map(|db| db.is_unique_violation())
                    .unwrap_or(false);
                if duplicate {
                    warn!(name = %player.name(), "Player name already exists in database");
                    AppError::Conflict(format!("Player {} already exists", player.name()))
                } else {
                    warn!(error = %e, "Failed to create player in database");
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let model = PlayerModel {
            id: row.get("id"),
            name: row.get("name"),
        };

        debug!(player_id = model.id, "Player created successfully in database");
        Ok(model)
    }

    #[instrument(skip(self))]
    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        let rows = sqlx::query("SELECT id, name FROM players ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, "Failed to list players from database");
                AppError::DatabaseError(e.to_string())
            })?;

        let players: Vec<PlayerModel> = rows
            .into_iter()
            .map(|row| PlayerModel {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect();

        debug!(player_count = players.len(), "Players listed from database");
        Ok(players)
    }

    #[instrument(skip(self))]
    async fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerModel>, AppError> {
        let row = sqlx::query("SELECT id, name FROM players WHERE id = $1")
            .bind(player_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to fetch player from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(row.map(|row| PlayerModel {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: PlayerId) -> Result<(), AppError> {
        debug!(player_id, "Deleting player from database");

        let result = sqlx::query("DELETE FROM players WHERE id = $1")
            .bind(player_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, player_id, "Failed to delete player from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(player_id, "Player not found for deletion");
            return Err(AppError::NotFound(format!("Player {} not found", player_id)));
        }

        debug!(player_id, "Player deleted successfully from database");
        Ok(())
    }
}
