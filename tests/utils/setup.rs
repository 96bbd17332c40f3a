use axum::Router;
use std::collections::HashMap;
use std::time::Duration;

use matchlog::{build_state, router, AppConfig};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    /// Player name to id, for every player registered during setup
    pub players: HashMap<String, i64>,
}

pub struct TestSetupBuilder {
    players: Vec<String>,
    config: AppConfig,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            players: vec![],
            config: AppConfig {
                cache_ttl: None,
                ..AppConfig::default()
            },
        }
    }

    pub fn with_players(mut self, players: Vec<&str>) -> Self {
        self.players = players.into_iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_alice_and_bob(self) -> Self {
        self.with_players(vec!["Alice", "Bob"])
    }

    /// Serves reads through the snapshot cache
    pub fn with_cache(mut self, ttl: Duration) -> Self {
        self.config.cache_ttl = Some(ttl);
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = limit;
        self
    }

    pub async fn build(self) -> TestSetup {
        let state = build_state(&self.config)
            .await
            .expect("in-memory state should build");

        let mut setup = TestSetup {
            app: router(state),
            players: HashMap::new(),
        };

        for name in &self.players {
            let id = setup.add_player(name).await;
            setup.players.insert(name.clone(), id);
        }

        setup
    }
}

impl Default for TestSetupBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSetup {
    pub fn id(&self, name: &str) -> i64 {
        *self
            .players
            .get(name)
            .unwrap_or_else(|| panic!("player {} was not registered", name))
    }
}
