use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::geometry::LogicalPoint;

/// Server-assigned player identifier; servers send either numbers or strings.
///
/// Numbers compare by value, so `3` and `3.0` name the same player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlayerId {
    Number(serde_json::Number),
    Text(String),
}

impl PartialEq for PlayerId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PlayerId::Number(a), PlayerId::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => a == b,
                _ => match (a.as_u64(), b.as_u64()) {
                    (Some(a), Some(b)) => a == b,
                    _ => a.as_f64() == b.as_f64(),
                },
            },
            (PlayerId::Text(a), PlayerId::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<u64> for PlayerId {
    fn from(n: u64) -> Self {
        PlayerId::Number(n.into())
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerId::Number(n) => write!(f, "{n}"),
            PlayerId::Text(s) => f.write_str(s),
        }
    }
}

// `null` reads as false, same as a missing field
fn false_if_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub active: bool,
    pub is_spotted: bool,
    pub x: f64,
    pub y: f64,
}

impl PlayerView {
    pub fn position(&self) -> LogicalPoint {
        LogicalPoint::new(self.x, self.y)
    }
}

/// Everything the server says about the round, replaced wholesale every tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStateSnapshot {
    pub game_started: bool,
    pub admin_x: f64,
    pub admin_y: f64,
    pub spotlight_radius: f64,
    #[serde(default, deserialize_with = "false_if_null")]
    pub game_over: bool,
    #[serde(default, deserialize_with = "false_if_null")]
    pub admin_won: bool,
    pub time_remaining: f64,
    pub players: Vec<PlayerView>,
}

impl Default for GameStateSnapshot {
    fn default() -> Self {
        // Spotlight parked in the middle of the display until the first tick
        Self {
            game_started: false,
            admin_x: 64.0,
            admin_y: 32.0,
            spotlight_radius: 15.0,
            game_over: false,
            admin_won: false,
            time_remaining: 0.0,
            players: Vec::new(),
        }
    }
}

impl GameStateSnapshot {
    pub fn spotlight_centre(&self) -> LogicalPoint {
        LogicalPoint::new(self.admin_x, self.admin_y)
    }

    /// The start control is offered only before the round with two or more players.
    pub fn can_start(&self) -> bool {
        !self.game_started && self.players.len() >= 2
    }

    pub fn player(&self, id: &PlayerId) -> Option<&PlayerView> {
        self.players.iter().find(|p| &p.id == id)
    }
}

/// Who we are on this connection
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub open: bool,
    pub player_id: Option<PlayerId>,
    pub name: String,
}

impl Session {
    pub fn new(name: String) -> Self {
        Self { open: false, player_id: None, name }
    }

    pub fn is_me(&self, id: &PlayerId) -> bool {
        self.player_id.as_ref() == Some(id)
    }
}
