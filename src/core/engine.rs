use std::time::Duration;

use anyhow::Result;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::{self, Message};
use tracing::{debug, info, warn};

use crate::client::websocket_client::WsStream;
use crate::core::game::{Context, Game};
use crate::core::input::{self, InputEvent};
use crate::core::websocket;

/// How long the loop sleeps when neither the socket nor the outbox has work
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct Engine<G: Game> {
    game: G,
    sink: SplitSink<WsStream, Message>,
    stream: SplitStream<WsStream>,
    ctx: Context<G::Outbound>,
    outbox: mpsc::UnboundedReceiver<G::Outbound>,
}

impl<G: Game> Engine<G> {
    /// `socket` must already be connected; the game hears about it in `start`.
    pub fn new(game: G, socket: WsStream) -> Self {
        let (sink, stream) = socket.split();
        let (ctx, outbox) = Context::new();
        Self { game, sink, stream, ctx, outbox }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn is_open(&self) -> bool {
        self.ctx.is_open()
    }

    /// Size the game for the screen and tell it the connection is up.
    pub fn start(&mut self, width: u16, height: u16) {
        self.game.handle_input(InputEvent::Resize { width, height }, &self.ctx);
        self.game.on_open(&self.ctx);
    }

    /// Hand one input to the game. Returns `false` once the player quits.
    pub async fn input(&mut self, event: InputEvent) -> bool {
        if event == InputEvent::Quit {
            info!("quit requested");
            if self.ctx.is_open() {
                let _ = self.sink.send(Message::Close(None)).await;
            }
            return false;
        }
        self.game.handle_input(event, &self.ctx);
        true
    }

    /// One round of network work: flush the outbox, handle the next frame,
    /// or give up after a frame interval. Neither side is touched once the
    /// connection is closed.
    pub async fn pump(&mut self) {
        let open = self.ctx.is_open();
        tokio::select! {
            // SEND: whatever the game queued, in order
            Some(first) = self.outbox.recv(), if open => self.flush(first).await,

            // RECEIVE: server pushes, strictly in delivery order
            incoming = self.stream.next(), if open => {
                dispatch(&mut self.game, &mut self.ctx, incoming);
            }

            // TICK: wake up to redraw and poll input
            _ = tokio::time::sleep(FRAME_INTERVAL) => {}
        }
    }

    /// Drive the session until the player quits. A lost connection does not
    /// end the loop; the game keeps rendering its last state.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        let size = terminal.size()?;
        self.start(size.width, size.height);

        loop {
            terminal.draw(|f| self.game.render(f))?;

            // INPUT (non-blocking)
            while crossterm::event::poll(Duration::ZERO)? {
                if let Some(event) = input::translate(crossterm::event::read()?) {
                    if !self.input(event).await {
                        return Ok(());
                    }
                }
            }

            self.pump().await;
        }
    }

    async fn flush(&mut self, first: G::Outbound) {
        let mut pending = vec![first];
        while let Ok(next) = self.outbox.try_recv() {
            pending.push(next);
        }
        for msg in pending {
            let text = match websocket::encode(&msg) {
                Ok(text) => text,
                Err(e) => {
                    warn!(error = %e, "dropping unencodable message");
                    continue;
                }
            };
            if let Err(e) = self.sink.send(Message::Text(text)).await {
                warn!(error = %e, "send failed");
                disconnect(&mut self.game, &mut self.ctx);
                break;
            }
        }
    }
}

/// Apply one item from the socket stream to the game.
fn dispatch<G: Game>(
    game: &mut G,
    ctx: &mut Context<G::Outbound>,
    incoming: Option<Result<Message, tungstenite::Error>>,
) {
    match incoming {
        Some(Ok(Message::Text(text))) => match websocket::decode::<G::Inbound>(&text) {
            Ok(msg) => game.handle_network(msg, ctx),
            Err(e) => warn!(error = %e, payload = %text, "ignoring malformed message"),
        },
        Some(Ok(Message::Close(frame))) => {
            info!(?frame, "server closed the connection");
            disconnect(game, ctx);
        }
        Some(Ok(other)) => debug!(kind = ?other, "ignoring non-text frame"),
        Some(Err(e)) => {
            warn!(error = %e, "websocket error");
            disconnect(game, ctx);
        }
        None => {
            info!("websocket stream ended");
            disconnect(game, ctx);
        }
    }
}

fn disconnect<G: Game>(game: &mut G, ctx: &mut Context<G::Outbound>) {
    if ctx.is_open() {
        ctx.close();
        game.on_close();
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    #[serde(tag = "type", rename_all = "camelCase")]
    enum Note {
        Seq { n: u32 },
    }

    /// Remembers what the engine fed it
    #[derive(Default)]
    struct Recorder {
        seen: Vec<u32>,
        closes: usize,
    }

    impl Game for Recorder {
        type Outbound = String;
        type Inbound = Note;

        fn on_open(&mut self, _ctx: &Context<String>) {}

        fn handle_network(&mut self, msg: Note, _ctx: &Context<String>) {
            let Note::Seq { n } = msg;
            self.seen.push(n);
        }

        fn handle_input(&mut self, _event: InputEvent, _ctx: &Context<String>) {}

        fn on_close(&mut self) {
            self.closes += 1;
        }

        fn render(&self, _frame: &mut ratatui::Frame) {}
    }

    fn text(s: &str) -> Option<Result<Message, tungstenite::Error>> {
        Some(Ok(Message::Text(s.to_string())))
    }

    #[test]
    fn test_frames_applied_in_delivery_order() {
        let (mut ctx, _rx) = Context::new();
        let mut game = Recorder::default();
        for n in [3, 1, 2] {
            dispatch(&mut game, &mut ctx, text(&format!(r#"{{"type":"seq","n":{n}}}"#)));
        }
        assert_eq!(game.seen, vec![3, 1, 2]);
    }

    #[test]
    fn test_malformed_frame_dropped_and_session_continues() {
        let (mut ctx, _rx) = Context::new();
        let mut game = Recorder::default();
        dispatch(&mut game, &mut ctx, text("{not json"));
        dispatch(&mut game, &mut ctx, text(r#"{"type":"seq"}"#));
        dispatch(&mut game, &mut ctx, text(r#"{"type":"seq","n":9}"#));
        assert_eq!(game.seen, vec![9]);
        assert!(ctx.is_open());
        assert_eq!(game.closes, 0);
    }

    #[test]
    fn test_non_text_frames_are_ignored() {
        let (mut ctx, _rx) = Context::new();
        let mut game = Recorder::default();
        dispatch(&mut game, &mut ctx, Some(Ok(Message::Ping(vec![1]))));
        dispatch(&mut game, &mut ctx, Some(Ok(Message::Binary(vec![0, 1]))));
        assert!(ctx.is_open());
        assert!(game.seen.is_empty());
    }

    #[test]
    fn test_close_reported_once_whatever_ends_the_stream() {
        let (mut ctx, mut rx) = Context::new();
        let mut game = Recorder::default();
        dispatch(&mut game, &mut ctx, Some(Ok(Message::Close(None))));
        dispatch(&mut game, &mut ctx, Some(Err(tungstenite::Error::ConnectionClosed)));
        dispatch(&mut game, &mut ctx, None);
        assert_eq!(game.closes, 1);

        assert!(!ctx.send("late".to_string()));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_stream_error_closes() {
        let (mut ctx, _rx) = Context::new();
        let mut game = Recorder::default();
        dispatch(&mut game, &mut ctx, Some(Err(tungstenite::Error::AlreadyClosed)));
        assert!(!ctx.is_open());
        assert_eq!(game.closes, 1);
    }

    #[test]
    fn test_end_of_stream_closes() {
        let (mut ctx, _rx) = Context::new();
        let mut game = Recorder::default();
        dispatch(&mut game, &mut ctx, None);
        assert!(!ctx.is_open());
        assert_eq!(game.closes, 1);
    }
}
