//! Declarative description of one frame.
//!
//! [`View::build`] maps the session and the latest snapshot to everything
//! the renderer draws. The renderer never looks at game state directly, and
//! the whole view is rebuilt on every frame, which is cheap given snapshots
//! replace all state anyway.

use crate::core::geometry::Viewport;

use super::state::{GameStateSnapshot, PlayerId, PlayerView, Session};

pub const STATUS_WAITING: &str = "Waiting for the game to start...";
pub const STATUS_RUNNING: &str = "Game is running! Avoid the spotlight!";
pub const STATUS_ADMIN_WON: &str = "Game Over: Admin won! All players were spotted.";
pub const STATUS_PLAYERS_WON: &str = "Game Over: Players won! At least one player survived.";
pub const STATUS_CONNECTION_LOST: &str = "Connection lost. Please restart the client.";

pub const BANNER_ADMIN_WON: &str = "Admin Won! All players were spotted.";
pub const BANNER_PLAYERS_WON: &str = "Players Won! At least one survived.";

/// Shown in place of the clock until the first snapshot arrives
pub const TIME_UNKNOWN: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterClass {
    Active,
    Eliminated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RosterRow {
    pub text: String,
    pub class: RosterClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerClass {
    Normal,
    Spotted,
    Eliminated,
}

/// One avatar, positioned relative to the container's top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerView {
    pub id: PlayerId,
    pub x: f64,
    pub y: f64,
    pub class: MarkerClass,
    pub is_self: bool,
}

/// Spotlight ellipse in container-relative cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightView {
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub status: &'static str,
    pub time_remaining: String,
    pub player_count: String,
    pub show_start: bool,
    pub roster: Vec<RosterRow>,
    pub spotlight: SpotlightView,
    pub markers: Vec<MarkerView>,
    pub banner: Option<&'static str>,
    pub viewport: Viewport,
}

impl View {
    /// `synced` is false until the first snapshot has been applied.
    pub fn build(
        session: &Session,
        snapshot: &GameStateSnapshot,
        synced: bool,
        banner: Option<&'static str>,
        viewport: Viewport,
    ) -> Self {
        let status = if session.open { status_line(snapshot) } else { STATUS_CONNECTION_LOST };
        let time_remaining = if synced {
            snapshot.time_remaining.to_string()
        } else {
            TIME_UNKNOWN.to_string()
        };

        let (x, y) = viewport.scale(snapshot.spotlight_centre());
        let (radius_x, radius_y) = viewport.scale_length(snapshot.spotlight_radius);

        Self {
            status,
            time_remaining,
            player_count: snapshot.players.len().to_string(),
            show_start: snapshot.can_start(),
            roster: snapshot.players.iter().map(|p| roster_row(p, session)).collect(),
            spotlight: SpotlightView { x, y, radius_x, radius_y },
            markers: snapshot.players.iter().map(|p| marker(p, session, &viewport)).collect(),
            banner,
            viewport,
        }
    }
}

pub fn status_line(snapshot: &GameStateSnapshot) -> &'static str {
    if snapshot.game_over {
        if snapshot.admin_won { STATUS_ADMIN_WON } else { STATUS_PLAYERS_WON }
    } else if snapshot.game_started {
        STATUS_RUNNING
    } else {
        STATUS_WAITING
    }
}

pub fn banner_text(admin_won: bool) -> &'static str {
    if admin_won { BANNER_ADMIN_WON } else { BANNER_PLAYERS_WON }
}

fn roster_row(player: &PlayerView, session: &Session) -> RosterRow {
    let text = if session.is_me(&player.id) {
        format!("{} (You)", player.name)
    } else {
        player.name.clone()
    };
    let class = if player.active { RosterClass::Active } else { RosterClass::Eliminated };
    RosterRow { text, class }
}

fn marker(player: &PlayerView, session: &Session, viewport: &Viewport) -> MarkerView {
    let (x, y) = viewport.scale(player.position());
    let class = if !player.active {
        MarkerClass::Eliminated
    } else if player.is_spotted {
        MarkerClass::Spotted
    } else {
        MarkerClass::Normal
    };
    MarkerView { id: player.id.clone(), x, y, class, is_self: session.is_me(&player.id) }
}
