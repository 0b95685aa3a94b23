pub mod game;
pub mod pointer;
pub mod protocol;
pub mod renderer;
pub mod state;
pub mod view;

pub use game::SpotlightClient;
pub use protocol::{ClientMessage, ServerMessage};

use anyhow::{Context as _, Result};
use tracing::{info, warn};

use crate::cli::Config;
use crate::client::identity::{resolve_player_name, SessionStore, NAME_QUERY_PARAM};
use crate::client::websocket_client::{connect, query_param, resolve_ws_url};
use crate::core::{engine::Engine, terminal::TerminalSession};
use pointer::PointerTracker;

/// Connect, register and play until the user quits
pub async fn run_game(config: Config) -> Result<()> {
    let store = SessionStore::new(config.session_file.clone());
    let stored = match config.name.as_deref() {
        // Same as the login form: an explicit name goes to storage first
        Some(name) => {
            if let Err(e) = store.save(name) {
                warn!(path = %store.path().display(), error = %e, "could not store display name");
            }
            Some(name.to_string())
        }
        None => store.load(),
    };

    let url = resolve_ws_url(&config.server)?;
    let name = resolve_player_name(stored, query_param(&url, NAME_QUERY_PARAM));
    info!(%url, %name, "connecting");

    let socket = connect(&url)
        .await
        .with_context(|| format!("could not reach the game server at {url}"))?;

    let game = SpotlightClient::new(name, PointerTracker::new(config.move_interval))
        .with_cell_aspect(config.cell_aspect);

    let mut terminal = TerminalSession::enter()?;
    let result = Engine::new(game, socket).run(terminal.terminal()).await;
    drop(terminal);

    info!("session finished");
    result
}
