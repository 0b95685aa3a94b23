/// Core game interface driven by the engine
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::mpsc;
use tracing::trace;

use crate::core::input::InputEvent;

/// Handle a game uses to talk to the server.
///
/// Messages go into the engine's outbox and are written to the socket in
/// order. Once the connection is closed every send is dropped on the floor;
/// nothing is queued for later.
pub struct Context<M> {
    tx: mpsc::UnboundedSender<M>,
    open: bool,
}

impl<M> Context<M> {
    /// A fresh, open context and the outbox it feeds.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<M>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, open: true }, rx)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Queue a message for the server. Returns whether it was accepted.
    pub fn send(&self, msg: M) -> bool {
        if !self.open {
            trace!("connection closed, dropping outbound message");
            return false;
        }
        self.tx.send(msg).is_ok()
    }
}

/// Main game trait: everything the engine needs to run a client session
pub trait Game {
    /// Messages the client sends to the server
    type Outbound: Serialize + Send + 'static;

    /// Messages the server pushes to the client
    type Inbound: DeserializeOwned;

    /// Called once, right after the connection is established
    fn on_open(&mut self, ctx: &Context<Self::Outbound>);

    /// A decoded message arrived from the server
    fn handle_network(&mut self, msg: Self::Inbound, ctx: &Context<Self::Outbound>);

    /// A terminal input arrived
    fn handle_input(&mut self, event: InputEvent, ctx: &Context<Self::Outbound>);

    /// The connection went away; no more messages will arrive
    fn on_close(&mut self);

    /// Draw the current state into the frame
    fn render(&self, frame: &mut ratatui::Frame);
}
