pub mod identity;
pub mod websocket_client;
