pub mod engine;
pub mod game;
pub mod geometry;
pub mod input;
pub mod terminal;

// JSON over WebSocket
pub mod websocket;
