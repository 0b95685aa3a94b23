use std::time::Instant;

use ratatui::layout::Rect;
use tracing::{debug, info, trace};

use crate::core::game::{Context, Game};
use crate::core::geometry::{Viewport, DEFAULT_CELL_ASPECT};
use crate::core::input::InputEvent;

use super::pointer::PointerTracker;
use super::protocol::{ClientMessage, ServerMessage};
use super::renderer;
use super::state::{GameStateSnapshot, PlayerId, PlayerView, Session};
use super::view::{banner_text, View};

/// Key that activates the start-game control
pub const START_KEY: char = 's';

/// Client side of one spotlight session: mirror of the last snapshot plus
/// the bits of local UI state the server does not own.
pub struct SpotlightClient {
    session: Session,
    snapshot: GameStateSnapshot,
    synced: bool,
    banner: Option<&'static str>,
    pointer: PointerTracker,
    viewport: Viewport,
    cell_aspect: f64,
}

impl SpotlightClient {
    pub fn new(name: String, pointer: PointerTracker) -> Self {
        Self {
            session: Session::new(name),
            snapshot: GameStateSnapshot::default(),
            synced: false,
            banner: None,
            pointer,
            viewport: Viewport::default(),
            cell_aspect: DEFAULT_CELL_ASPECT,
        }
    }

    pub fn with_cell_aspect(mut self, cell_aspect: f64) -> Self {
        self.cell_aspect = cell_aspect;
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> &GameStateSnapshot {
        &self.snapshot
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn view(&self) -> View {
        View::build(&self.session, &self.snapshot, self.synced, self.banner, self.viewport)
    }

    fn local_player(&self) -> Option<&PlayerView> {
        self.session.player_id.as_ref().and_then(|id| self.snapshot.player(id))
    }

    fn local_player_active(&self) -> bool {
        self.local_player().is_some_and(|p| p.active)
    }

    fn may_start_moving(&self) -> bool {
        self.snapshot.game_started && !self.snapshot.game_over && self.local_player_active()
    }

    fn resize(&mut self, width: u16, height: u16) {
        let arena = renderer::arena_area(Rect::new(0, 0, width, height));
        self.viewport = Viewport::fit(arena, self.cell_aspect);
        debug!(width, height, viewport = ?self.viewport, "arena resized");
    }

    fn send_move(&mut self, column: f64, row: f64, ctx: &Context<ClientMessage>) {
        if let Some(target) = self.pointer.track(&self.viewport, column, row, Instant::now()) {
            ctx.send(ClientMessage::MovePlayer { x: target.x, y: target.y });
        }
    }

    fn apply_snapshot(&mut self, snapshot: GameStateSnapshot) {
        if snapshot.game_over {
            self.banner = Some(banner_text(snapshot.admin_won));
        }
        self.snapshot = snapshot;
        self.synced = true;
    }

    fn register(&mut self, id: PlayerId, name: String) {
        info!(%id, %name, "registered");
        self.session.player_id = Some(id);
        self.session.name = name;
    }
}

impl Game for SpotlightClient {
    type Outbound = ClientMessage;
    type Inbound = ServerMessage;

    fn on_open(&mut self, ctx: &Context<Self::Outbound>) {
        self.session.open = true;
        info!(name = %self.session.name, "registering");
        ctx.send(ClientMessage::Register { name: self.session.name.clone() });
    }

    fn handle_network(&mut self, msg: Self::Inbound, _ctx: &Context<Self::Outbound>) {
        match msg {
            ServerMessage::Registered { id, name } => self.register(id, name),
            ServerMessage::GameState(snapshot) => {
                debug!(
                    players = snapshot.players.len(),
                    started = snapshot.game_started,
                    "snapshot"
                );
                self.apply_snapshot(snapshot);
            }
            ServerMessage::Unknown => trace!("ignoring message with unknown type"),
        }
    }

    fn handle_input(&mut self, event: InputEvent, ctx: &Context<Self::Outbound>) {
        match event {
            InputEvent::Resize { width, height } => self.resize(width, height),
            InputEvent::PointerDown { column, row } => {
                if self.viewport.contains(column, row) && self.may_start_moving() {
                    self.pointer.press();
                    self.send_move(column, row, ctx);
                }
            }
            InputEvent::PointerMove { column, row } => {
                if self.local_player_active() {
                    self.send_move(column, row, ctx);
                }
            }
            InputEvent::PointerUp => {
                if let Some(target) = self.pointer.release() {
                    if self.local_player_active() {
                        ctx.send(ClientMessage::MovePlayer { x: target.x, y: target.y });
                    }
                }
            }
            InputEvent::Key(START_KEY) => {
                if self.snapshot.can_start() {
                    info!("requesting game start");
                    ctx.send(ClientMessage::StartGame);
                }
            }
            InputEvent::Key(_) | InputEvent::Quit => {}
        }
    }

    fn on_close(&mut self) {
        info!("connection closed");
        self.session.open = false;
        let _ = self.pointer.release();
    }

    fn render(&self, frame: &mut ratatui::Frame) {
        renderer::draw(frame, &self.view());
    }
}
