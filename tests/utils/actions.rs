use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

use super::setup::TestSetup;

// ============================================================================
// Action Helpers
// ============================================================================

impl TestSetup {
    /// Send a request and return the status with the parsed JSON body, if any
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    /// GET a route that must succeed and decode its body
    pub async fn get<T: DeserializeOwned>(&self, uri: &str) -> T {
        let (status, body) = self.send("GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "GET {} failed: {}", uri, body);
        serde_json::from_value(body).unwrap()
    }

    // ============================================================================
    // Convenience Action Methods
    // ============================================================================

    /// Register a player and return their id
    pub async fn add_player(&self, name: &str) -> i64 {
        let (status, body) = self
            .send("POST", "/players", Some(json!({ "name": name })))
            .await;
        assert_eq!(status, StatusCode::CREATED, "creating {} failed: {}", name, body);
        body["id"].as_i64().unwrap()
    }

    /// Record a game between two registered players and return its id
    pub async fn record_game(&self, game: GameInput<'_>) -> i64 {
        let (status, body) = self.send("POST", "/games", Some(game.to_json(self))).await;
        assert_eq!(status, StatusCode::CREATED, "recording game failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    pub async fn edit_game(&self, game_id: i64, game: GameInput<'_>) -> StatusCode {
        let (status, _) = self
            .send("PUT", &format!("/games/{}", game_id), Some(game.to_json(self)))
            .await;
        status
    }
}

/// A game described by player names
pub struct GameInput<'a> {
    pub winner: &'a str,
    pub loser: &'a str,
    pub format: &'a str,
    pub edition: Option<&'a str>,
    pub winner_colors: Vec<&'a str>,
    pub loser_colors: Vec<&'a str>,
    /// RFC 3339 timestamp
    pub played_at: &'a str,
}

impl<'a> GameInput<'a> {
    pub fn new(winner: &'a str, loser: &'a str, format: &'a str, played_at: &'a str) -> Self {
        Self {
            winner,
            loser,
            format,
            edition: None,
            winner_colors: vec![],
            loser_colors: vec![],
            played_at,
        }
    }

    pub fn colors(mut self, winner: Vec<&'a str>, loser: Vec<&'a str>) -> Self {
        self.winner_colors = winner;
        self.loser_colors = loser;
        self
    }

    pub fn edition(mut self, edition: &'a str) -> Self {
        self.edition = Some(edition);
        self
    }

    fn to_json(&self, setup: &TestSetup) -> Value {
        json!({
            "winner_id": setup.id(self.winner),
            "loser_id": setup.id(self.loser),
            "format": self.format,
            "edition": self.edition,
            "winner_colors": self.winner_colors,
            "loser_colors": self.loser_colors,
            "played_at": self.played_at,
        })
    }
}
