//! Read-through snapshot cache in front of the player and game stores.
//!
//! Every read served here comes from a full snapshot of the underlying table,
//! refreshed once its TTL has elapsed. Any write through either cached
//! repository drops both snapshots.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::games::{
    repository::GameRepository, GameId, GameRecord, HistoryQuery, NewGame,
};
use crate::players::{repository::PlayerRepository, NewPlayer, PlayerId, PlayerModel};
use crate::shared::AppError;

struct CacheEntry<T> {
    fetched_at: Instant,
    value: T,
}

struct CacheState<T> {
    /// Bumped on every invalidation so loads that raced a write are discarded
    generation: u64,
    entry: Option<CacheEntry<T>>,
}

/// Single value that expires `ttl` after it was fetched
pub struct TtlCache<T> {
    ttl: Duration,
    state: RwLock<CacheState<T>>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            state: RwLock::new(CacheState {
                generation: 0,
                entry: None,
            }),
        }
    }

    /// Returns the cached value while fresh
    pub async fn get(&self) -> Option<T> {
        let state = self.state.read().await;
        state
            .entry
            .as_ref()
            .filter(|entry| entry.fetched_at.elapsed() < self.ttl)
            .map(|entry| entry.value.clone())
    }

    pub async fn invalidate(&self) {
        let mut state = self.state.write().await;
        state.generation += 1;
        state.entry = None;
    }

    /// Returns the cached value, or runs `load` and caches its result.
    /// Errors are passed through and never cached.
    pub async fn get_or_try_load<F, Fut>(&self, load: F) -> Result<T, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        if let Some(value) = self.get().await {
            return Ok(value);
        }

        let generation = self.state.read().await.generation;
        let value = load().await?;

        let mut state = self.state.write().await;
        if state.generation == generation {
            state.entry = Some(CacheEntry {
                fetched_at: Instant::now(),
                value: value.clone(),
            });
        }
        Ok(value)
    }
}

/// Snapshots shared by both cached repositories
pub struct StoreCache {
    players: TtlCache<Vec<PlayerModel>>,
    games: TtlCache<Vec<GameRecord>>,
}

impl StoreCache {
    pub fn new(ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            players: TtlCache::new(ttl),
            games: TtlCache::new(ttl),
        })
    }

    pub async fn invalidate_all(&self) {
        self.players.invalidate().await;
        self.games.invalidate().await;
        debug!("Store cache invalidated");
    }
}

pub struct CachedPlayerRepository {
    inner: Arc<dyn PlayerRepository + Send + Sync>,
    cache: Arc<StoreCache>,
}

impl CachedPlayerRepository {
    pub fn new(inner: Arc<dyn PlayerRepository + Send + Sync>, cache: Arc<StoreCache>) -> Self {
        Self { inner, cache }
    }

    async fn snapshot(&self) -> Result<Vec<PlayerModel>, AppError> {
        self.cache
            .players
            .get_or_try_load(|| async move {
                debug!("Player snapshot refreshed");
                self.inner.list_players().await
            })
            .await
    }
}

#[async_trait]
impl PlayerRepository for CachedPlayerRepository {
    #[instrument(skip(self, player))]
    async fn create_player(&self, player: &NewPlayer) -> Result<PlayerModel, AppError> {
        let created = self.inner.create_player(player).await?;
        self.cache.invalidate_all().await;
        Ok(created)
    }

    async fn list_players(&self) -> Result<Vec<PlayerModel>, AppError> {
        self.snapshot().await
    }

    async fn get_player(&self, player_id: PlayerId) -> Result<Option<PlayerModel>, AppError> {
        let players = self.snapshot().await?;
        Ok(players.into_iter().find(|p| p.id == player_id))
    }

    #[instrument(skip(self))]
    async fn delete_player(&self, player_id: PlayerId) -> Result<(), AppError> {
        let result = self.inner.delete_player(player_id).await;
        self.cache.invalidate_all().await;
        result
    }
}

pub struct CachedGameRepository {
    inner: Arc<dyn GameRepository + Send + Sync>,
    cache: Arc<StoreCache>,
}

impl CachedGameRepository {
    pub fn new(inner: Arc<dyn GameRepository + Send + Sync>, cache: Arc<StoreCache>) -> Self {
        Self { inner, cache }
    }

    async fn snapshot(&self) -> Result<Vec<GameRecord>, AppError> {
        self.cache
            .games
            .get_or_try_load(|| async move {
                debug!("Game snapshot refreshed");
                self.inner.list_games().await
            })
            .await
    }
}

#[async_trait]
impl GameRepository for CachedGameRepository {
    #[instrument(skip(self, game))]
    async fn create_game(&self, game: &NewGame) -> Result<GameRecord, AppError> {
        let created = self.inner.create_game(game).await?;
        self.cache.invalidate_all().await;
        Ok(created)
    }

    async fn list_games(&self) -> Result<Vec<GameRecord>, AppError> {
        self.snapshot().await
    }

    async fn get_game(&self, game_id: GameId) -> Result<Option<GameRecord>, AppError> {
        let games = self.snapshot().await?;
        Ok(games.into_iter().find(|g| g.id == game_id))
    }

    async fn list_games_filtered(&self, query: &HistoryQuery) -> Result<Vec<GameRecord>, AppError> {
        let games = self.snapshot().await?;
        Ok(query.select(&games))
    }

    #[instrument(skip(self, game))]
    async fn update_game(&self, game_id: GameId, game: &NewGame) -> Result<GameRecord, AppError> {
        let result = self.inner.update_game(game_id, game).await;
        self.cache.invalidate_all().await;
        result
    }

    #[instrument(skip(self))]
    async fn delete_game(&self, game_id: GameId) -> Result<(), AppError> {
        let result = self.inner.delete_game(game_id).await;
        self.cache.invalidate_all().await;
        result
    }
}
