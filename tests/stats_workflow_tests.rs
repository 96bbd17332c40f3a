mod utils;

use axum::http::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;

use matchlog::stats::{ColorWinRate, MatchupRecord, PlayerWinRate};
use utils::{
    assert_color_rate, assert_partitioned, assert_player_rate, opponent_names, GameInput,
    TestSetup, TestSetupBuilder,
};

/// Alice beats Bob in a January Draft, loses the next Draft, then wins a
/// Commander game in February
async fn alice_and_bob(builder: TestSetupBuilder) -> TestSetup {
    let setup = builder.with_alice_and_bob().build().await;

    setup
        .record_game(
            GameInput::new("Alice", "Bob", "Draft", "2024-01-01T19:00:00Z")
                .colors(vec!["Blue"], vec!["Red"]),
        )
        .await;
    setup
        .record_game(
            GameInput::new("Bob", "Alice", "Draft", "2024-01-05T19:00:00Z")
                .colors(vec!["Red"], vec!["Blue"]),
        )
        .await;
    setup
        .record_game(
            GameInput::new("Alice", "Bob", "Commander", "2024-02-01T19:00:00Z")
                .colors(vec!["Blue", "White"], vec!["Black"])
                .edition("Foundations"),
        )
        .await;

    setup
}

#[tokio::test]
async fn health_check_responds() {
    let setup = TestSetupBuilder::new().build().await;

    let (status, body) = setup.send("GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn scenario_win_rates_matchups_and_colors() {
    let setup = alice_and_bob(TestSetupBuilder::new()).await;
    let alice = setup.id("Alice");

    let rates: Vec<PlayerWinRate> = setup.get("/stats/win-rates").await;
    assert_eq!(rates[0].player_name, "Alice", "highest rate comes first");
    assert_player_rate(&rates, "Alice", 2, 1, 66.67);
    assert_player_rate(&rates, "Bob", 1, 2, 33.33);
    assert_partitioned(&rates, 3);

    let matchups: Vec<MatchupRecord> = setup
        .get(&format!("/stats/players/{}/matchups", alice))
        .await;
    assert_eq!(opponent_names(&matchups), vec!["Bob"]);
    assert_eq!((matchups[0].wins, matchups[0].losses), (2, 1));
    assert!((matchups[0].win_rate - 0.667).abs() < 0.001);

    let colors: Vec<ColorWinRate> = setup
        .get(&format!("/stats/players/{}/colors", alice))
        .await;
    assert_color_rate(&colors, "Blue", 2, 1);
    assert_color_rate(&colors, "White", 1, 0);
    assert!(colors.iter().all(|r| r.color_key != "Red"));
}

#[tokio::test]
async fn filters_narrow_every_view() {
    let setup = alice_and_bob(TestSetupBuilder::new()).await;
    let alice = setup.id("Alice");

    let drafts: Vec<PlayerWinRate> = setup.get("/stats/win-rates?format=Draft").await;
    assert_player_rate(&drafts, "Alice", 1, 1, 50.0);
    assert_partitioned(&drafts, 2);

    let january: Vec<PlayerWinRate> = setup
        .get("/stats/win-rates?start_date=2024-01-01&end_date=2024-01-31")
        .await;
    assert_partitioned(&january, 2);

    let foundations: Vec<MatchupRecord> = setup
        .get(&format!(
            "/stats/players/{}/matchups?edition=Foundations",
            alice
        ))
        .await;
    assert_eq!((foundations[0].wins, foundations[0].losses), (1, 0));

    let no_edition: Vec<ColorWinRate> = setup
        .get(&format!(
            "/stats/players/{}/colors?edition=None&mode=per_combination",
            alice
        ))
        .await;
    assert_eq!(no_edition.len(), 1);
    assert_color_rate(&no_edition, "Blue", 1, 1);

    let empty: Vec<PlayerWinRate> = setup
        .get("/stats/win-rates?start_date=2024-03-01&end_date=2024-02-01")
        .await;
    assert!(empty.is_empty());
}

#[tokio::test]
async fn edits_and_deletes_are_reflected_through_the_cache() {
    let setup = TestSetupBuilder::new()
        .with_cache(Duration::from_secs(300))
        .with_alice_and_bob()
        .build()
        .await;

    let game_id = setup
        .record_game(GameInput::new("Alice", "Bob", "Sealed", "2024-01-01T19:00:00Z"))
        .await;
    let rates: Vec<PlayerWinRate> = setup.get("/stats/win-rates").await;
    assert_player_rate(&rates, "Alice", 1, 0, 100.0);

    let status = setup
        .edit_game(
            game_id,
            GameInput::new("Bob", "Alice", "Sealed", "2024-01-01T19:00:00Z"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let rates: Vec<PlayerWinRate> = setup.get("/stats/win-rates").await;
    assert_player_rate(&rates, "Bob", 1, 0, 100.0);

    let (status, _) = setup
        .send("DELETE", &format!("/games/{}", game_id), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let rates: Vec<PlayerWinRate> = setup.get("/stats/win-rates").await;
    assert!(rates.is_empty());
}

#[tokio::test]
async fn deleted_player_shows_as_unknown() {
    let setup = alice_and_bob(TestSetupBuilder::new()).await;
    let bob = setup.id("Bob");

    let (status, _) = setup
        .send("DELETE", &format!("/players/{}", bob), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let rates: Vec<PlayerWinRate> = setup.get("/stats/win-rates").await;
    assert_player_rate(&rates, "Unknown", 1, 2, 33.33);

    let history: Vec<Value> = setup.get("/games").await;
    assert!(history.iter().all(|g| g["winner_name"] == "Unknown"
        || g["loser_name"] == "Unknown"));

    let (status, _) = setup
        .send("GET", &format!("/stats/players/{}/matchups", bob), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn history_is_newest_first_and_limited() {
    let setup = alice_and_bob(TestSetupBuilder::new().with_history_limit(2)).await;

    let history: Vec<Value> = setup.get("/games").await;
    let formats: Vec<&str> = history.iter().map(|g| g["format"].as_str().unwrap()).collect();
    assert_eq!(formats, vec!["Commander", "Draft"]);

    let history: Vec<Value> = setup.get("/games?limit=10&format=Draft").await;
    assert_eq!(history.len(), 2);

    let options: Value = setup.get("/games/options").await;
    assert_eq!(options["formats"], json!(["Draft", "Commander"]));
    assert_eq!(options["editions"], json!(["Foundations"]));
}

#[tokio::test]
async fn invalid_input_is_rejected() {
    let setup = TestSetupBuilder::new().with_alice_and_bob().build().await;
    let alice = setup.id("Alice");

    let (status, _) = setup
        .send("POST", "/players", Some(json!({ "name": "Alice" })))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = setup
        .send("POST", "/players", Some(json!({ "name": "   " })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = setup
        .send(
            "POST",
            "/games",
            Some(json!({ "winner_id": alice, "loser_id": alice, "format": "Draft" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = setup.send("GET", "/stats/win-rates?format=Vintage", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let rates: Vec<PlayerWinRate> = setup.get("/stats/win-rates").await;
    assert!(rates.is_empty());
}
