use serde::{Deserialize, Serialize};

use super::models::{PlayerId, PlayerModel};

/// Request payload for registering a player
#[derive(Debug, Deserialize)]
pub struct PlayerCreateRequest {
    pub name: String,
}

/// Player as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: PlayerId,
    pub name: String,
}

impl From<PlayerModel> for PlayerResponse {
    fn from(model: PlayerModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}
