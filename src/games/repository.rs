use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Postgres, QueryBuilder, Row};
use std::collections::BTreeMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

use super::{
    filter::{EditionFilter, HistoryQuery},
    models::{ColorSet, Edition, GameFormat, GameId, GameRecord, NewGame},
};
use crate::shared::AppError;

/// Trait for game repository operations
#[async_trait]
pub trait GameRepository {
    /// Stores a validated game and returns it with its assigned id
    async fn create_game(&self, game: &NewGame) -> Result<GameRecord, AppError>;
    async fn list_games(&self) -> Result<Vec<GameRecord>, AppError>;
    async fn get_game(&self, game_id: GameId) -> Result<Option<GameRecord>, AppError>;

    /// Returns games matching the query, newest first, honouring its limit
    async fn list_games_filtered(&self, query: &HistoryQuery) -> Result<Vec<GameRecord>, AppError>;

    /// Replaces every mutable field of an existing game
    async fn update_game(&self, game_id: GameId, game: &NewGame) -> Result<GameRecord, AppError>;
    async fn delete_game(&self, game_id: GameId) -> Result<(), AppError>;
}

#[derive(Debug, Default)]
struct GameTable {
    next_id: GameId,
    rows: BTreeMap<GameId, GameRecord>,
}

/// In-memory implementation of GameRepository for development and testing
pub struct InMemoryGameRepository {
    games: Mutex<GameTable>,
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryGameRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self::with_games(Vec::new())
    }

    /// Creates an in-memory repository with pre-populated records, including
    /// ones a real store could only produce from legacy rows
    pub fn with_games(games: Vec<GameRecord>) -> Self {
        let next_id = games.iter().map(|g| g.id).max().unwrap_or(0) + 1;
        let rows = games.into_iter().map(|g| (g.id, g)).collect();

        Self {
            games: Mutex::new(GameTable { next_id, rows }),
        }
    }

    /// Returns the current number of games in the repository
    pub fn game_count(&self) -> usize {
        self.games.lock().unwrap().rows.len()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &NewGame) -> Result<GameRecord, AppError> {
        debug!(
            winner_id = game.winner_id,
            loser_id = game.loser_id,
            format = %game.format,
            "Creating game in memory"
        );

        let mut table = self.games.lock().unwrap();
        let id = table.next_id;
        table.next_id += 1;

        let record = game.clone().into_record(id);
        table.rows.insert(id, record.clone());

        debug!(game_id = id, "Game created successfully in memory");
        Ok(record)
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameRecord>, AppError> {
        let table = self.games.lock().unwrap();
        let games: Vec<GameRecord> = table.rows.values().cloned().collect();

        debug!(game_count = games.len(), "Games listed from memory");
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: GameId) -> Result<Option<GameRecord>, AppError> {
        let table = self.games.lock().unwrap();
        let game = table.rows.get(&game_id).cloned();

        if game.is_none() {
            debug!(game_id, "Game not found in memory");
        }
        Ok(game)
    }

    #[instrument(skip(self))]
    async fn list_games_filtered(&self, query: &HistoryQuery) -> Result<Vec<GameRecord>, AppError> {
        let table = self.games.lock().unwrap();
        let games: Vec<GameRecord> = table.rows.values().cloned().collect();
        let selected = query.select(&games);

        debug!(
            game_count = selected.len(),
            "Filtered games listed from memory"
        );
        Ok(selected)
    }

    #[instrument(skip(self, game))]
    async fn update_game(&self, game_id: GameId, game: &NewGame) -> Result<GameRecord, AppError> {
        debug!(game_id, "Updating game in memory");

        let mut table = self.games.lock().unwrap();
        let Some(slot) = table.rows.get_mut(&game_id) else {
            warn!(game_id, "Game not found for update in memory");
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        };
        *slot = game.clone().into_record(game_id);

        debug!(game_id, "Game updated successfully in memory");
        Ok(slot.clone())
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, game_id: GameId) -> Result<(), AppError> {
        debug!(game_id, "Deleting game from memory");

        let mut table = self.games.lock().unwrap();
        if table.rows.remove(&game_id).is_none() {
            warn!(game_id, "Game not found for deletion in memory");
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        }

        debug!(game_id, "Game deleted successfully from memory");
        Ok(())
    }
}

const GAME_COLUMNS: &str =
    "id, winner_id, loser_id, format, edition, winner_colors, loser_colors, played_at";

/// PostgreSQL implementation of game repository.
///
/// Color sides are stored as JSONB arrays of labels. Rows are decoded
/// leniently: an unknown format drops the row, malformed color data or
/// timestamps degrade to `None` on the record.
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn colors_json(colors: &ColorSet) -> serde_json::Value {
    serde_json::Value::from(colors.labels())
}

fn decode_colors(row: &PgRow, column: &str, game_id: GameId) -> Option<ColorSet> {
    let value: Option<serde_json::Value> = row.try_get(column).ok().flatten();
    let labels: Vec<String> = serde_json::from_value(value?)
        .map_err(|e| warn!(game_id, column, error = %e, "Color column is not a list"))
        .ok()?;
    ColorSet::from_labels(&labels)
        .map_err(|e| warn!(game_id, column, error = %e, "Color column has unknown labels"))
        .ok()
}

fn decode_game(row: &PgRow) -> Option<GameRecord> {
    let id: GameId = row.try_get("id").ok()?;

    let format_label: String = row.try_get("format").ok()?;
    let format = match GameFormat::try_from(format_label) {
        Ok(format) => format,
        Err(e) => {
            warn!(game_id = id, error = %e, "Skipping game with unknown format");
            return None;
        }
    };

    let participants = (
        row.try_get::<i64, _>("winner_id"),
        row.try_get::<i64, _>("loser_id"),
    );
    let (winner_id, loser_id) = match participants {
        (Ok(winner), Ok(loser)) => (winner, loser),
        _ => {
            warn!(game_id = id, "Skipping game with missing participants");
            return None;
        }
    };
    if winner_id == loser_id {
        warn!(game_id = id, player_id = winner_id, "Skipping game against self");
        return None;
    }

    let edition: Option<String> = row.try_get("edition").ok().flatten();
    let played_at: Option<DateTime<Utc>> = row.try_get("played_at").ok().flatten();

    Some(GameRecord {
        id,
        winner_id,
        loser_id,
        format,
        edition: edition.as_deref().and_then(Edition::parse),
        winner_colors: decode_colors(row, "winner_colors", id),
        loser_colors: decode_colors(row, "loser_colors", id),
        played_at,
    })
}

fn decode_games(rows: &[PgRow]) -> Vec<GameRecord> {
    rows.iter().filter_map(decode_game).collect()
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &NewGame) -> Result<GameRecord, AppError> {
        debug!(
            winner_id = game.winner_id,
            loser_id = game.loser_id,
            format = %game.format,
            "Creating game in database"
        );

        let row = sqlx::query(
            "INSERT INTO games (winner_id, loser_id, format, edition, winner_colors, loser_colors, played_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id",
        )
        .bind(game.winner_id)
        .bind(game.loser_id)
        .bind(game.format.to_string())
        .bind(game.edition.as_ref().map(Edition::as_str))
        .bind(colors_json(&game.winner_colors))
        .bind(colors_json(&game.loser_colors))
        .bind(game.played_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to create game in database");
            AppError::DatabaseError(e.to_string())
        })?;

        let id: GameId = row.get("id");
        debug!(game_id = id, "Game created successfully in database");
        Ok(game.clone().into_record(id))
    }

    #[instrument(skip(self))]
    async fn list_games(&self) -> Result<Vec<GameRecord>, AppError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM games ORDER BY played_at DESC NULLS LAST, id DESC",
            GAME_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, "Failed to list games from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let games = decode_games(&rows);
        debug!(
            row_count = rows.len(),
            game_count = games.len(),
            "Games listed from database"
        );
        Ok(games)
    }

    #[instrument(skip(self))]
    async fn get_game(&self, game_id: GameId) -> Result<Option<GameRecord>, AppError> {
        let row = sqlx::query(&format!("SELECT {} FROM games WHERE id = $1", GAME_COLUMNS))
            .bind(game_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, game_id, "Failed to fetch game from database");
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(row.as_ref().and_then(decode_game))
    }

    #[instrument(skip(self))]
    async fn list_games_filtered(&self, query: &HistoryQuery) -> Result<Vec<GameRecord>, AppError> {
        let filter = &query.filter;
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM games WHERE TRUE", GAME_COLUMNS));

        if let Some(player_id) = query.player_id {
            builder
                .push(" AND (winner_id = ")
                .push_bind(player_id)
                .push(" OR loser_id = ")
                .push_bind(player_id)
                .push(")");
        }
        if let Some(start) = filter.start_date {
            builder.push(" AND played_at >= ").push_bind(start_of_day(start));
        }
        if let Some(end) = filter.end_date {
            match end.succ_opt() {
                Some(next) => {
                    builder.push(" AND played_at < ").push_bind(start_of_day(next));
                }
                None => {
                    builder.push(" AND played_at IS NOT NULL");
                }
            }
        }
        if let Some(format) = filter.format {
            builder.push(" AND format = ").push_bind(format.to_string());
        }
        match &filter.edition {
            EditionFilter::Any => {}
            EditionFilter::Unset => {
                builder.push(" AND (edition IS NULL OR TRIM(edition) = '' OR edition = 'None')");
            }
            EditionFilter::Only(edition) => {
                builder
                    .push(" AND edition = ")
                    .push_bind(edition.as_str().to_string());
            }
        }

        builder.push(" ORDER BY played_at DESC NULLS LAST, id DESC");
        if let Some(limit) = query.limit {
            builder.push(" LIMIT ").push_bind(limit as i64);
        }

        let rows = builder.build().fetch_all(&self.pool).await.map_err(|e| {
            warn!(error = %e, "Failed to list filtered games from database");
            AppError::DatabaseError(e.to_string())
        })?;

        let games = decode_games(&rows);
        debug!(game_count = games.len(), "Filtered games listed from database");
        Ok(games)
    }

    #[instrument(skip(self, game))]
    async fn update_game(&self, game_id: GameId, game: &NewGame) -> Result<GameRecord, AppError> {
        debug!(game_id, "Updating game in database");

        let result = sqlx::query(
            "UPDATE games SET winner_id = $2, loser_id = $3, format = $4, edition = $5, \
             winner_colors = $6, loser_colors = $7, played_at = $8 WHERE id = $1",
        )
        .bind(game_id)
        .bind(game.winner_id)
        .bind(game.loser_id)
        .bind(game.format.to_string())
        .bind(game.edition.as_ref().map(Edition::as_str))
        .bind(colors_json(&game.winner_colors))
        .bind(colors_json(&game.loser_colors))
        .bind(game.played_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            warn!(error = %e, game_id, "Failed to update game in database");
            AppError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            warn!(game_id, "Game not found for update");
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        }

        debug!(game_id, "Game updated successfully in database");
        Ok(game.clone().into_record(game_id))
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, game_id: GameId) -> Result<(), AppError> {
        debug!(game_id, "Deleting game from database");

        let result = sqlx::query("DELETE FROM games WHERE id = $1")
            .bind(game_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                warn!(error = %e, game_id, "Failed to delete game from database");
                AppError::DatabaseError(e.to_string())
            })?;

        if result.rows_affected() == 0 {
            warn!(game_id, "Game not found for deletion");
            return Err(AppError::NotFound(format!("Game {} not found", game_id)));
        }

        debug!(game_id, "Game deleted successfully from database");
        Ok(())
    }
}
