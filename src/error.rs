use tokio_tungstenite::tungstenite;
use tokio_tungstenite::tungstenite::http::header::InvalidHeaderValue;

/// Errors raised by the inbox client and the flip server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported URL scheme '{0}', expected 'ws'")]
    UnsupportedScheme(String),

    #[error("endpoint URL has no host")]
    MissingHost,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    #[error("invalid header value: {0}")]
    Header(#[from] InvalidHeaderValue),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Mirrors the browser's InvalidStateError for `send()` before the handshake completes.
    #[error("WebSocket is still in CONNECTING state")]
    StillConnecting,

    #[error("connection task has stopped")]
    ConnectionGone,

    #[error("no element with id '{0}'")]
    UnknownElement(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
