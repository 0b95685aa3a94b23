/// WebSocket connection to the game server
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite, MaybeTlsStream, WebSocketStream};
use tracing::info;

/// Endpoint path the game server listens on
pub const SOCKET_PATH: &str = "/ws";

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("invalid server address '{0}'")]
    InvalidAddress(String),

    #[error("websocket handshake with {url} failed")]
    Handshake {
        url: String,
        #[source]
        source: tungstenite::Error,
    },
}

/// Turn a server address into the socket URL, the way the page derived it
/// from its own location.
///
/// `https://` maps to `wss://`, `http://` and bare `host:port` map to `ws://`,
/// always on [`SOCKET_PATH`]. Explicit `ws://`/`wss://` URLs keep their path
/// and only get [`SOCKET_PATH`] when they have none. Query strings survive.
pub fn resolve_ws_url(server: &str) -> Result<String, ConnectError> {
    let invalid = || ConnectError::InvalidAddress(server.to_string());
    let trimmed = server.trim();

    let (scheme, rest, keep_path) = match trimmed.split_once("://") {
        Some((scheme, rest)) => match scheme.to_ascii_lowercase().as_str() {
            "https" => ("wss", rest, false),
            "http" => ("ws", rest, false),
            "wss" => ("wss", rest, true),
            "ws" => ("ws", rest, true),
            _ => return Err(invalid()),
        },
        None => ("ws", trimmed, false),
    };

    let (location, query) = match rest.split_once('?') {
        Some((location, query)) => (location, Some(query)),
        None => (rest, None),
    };
    let (host, path) = match location.find('/') {
        Some(i) => location.split_at(i),
        None => (location, ""),
    };
    if host.is_empty() || host.contains(char::is_whitespace) {
        return Err(invalid());
    }

    let path = if keep_path && !path.is_empty() && path != "/" { path } else { SOCKET_PATH };
    let mut url = format!("{scheme}://{host}{path}");
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        url.push('?');
        url.push_str(query);
    }
    Ok(url)
}

/// First value of `key` in the URL's query string, percent-decoded.
pub fn query_param(url: &str, key: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or_default();
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Open the socket; resolves once the handshake is done.
pub async fn connect(url: &str) -> Result<WsStream, ConnectError> {
    let (stream, response) = connect_async(url).await.map_err(|source| ConnectError::Handshake {
        url: url.to_string(),
        source,
    })?;
    info!(%url, status = %response.status(), "websocket connection established");
    Ok(stream)
}
