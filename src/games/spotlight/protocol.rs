/// Messages exchanged with the spotlight server, tagged by their `type` field
use serde::{Deserialize, Serialize};

use super::state::{GameStateSnapshot, PlayerId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Register { name: String },
    StartGame,
    MovePlayer { x: f64, y: f64 },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    Registered { id: PlayerId, name: String },
    GameState(GameStateSnapshot),
    /// Any tag this client does not know about
    #[serde(other)]
    Unknown,
}
