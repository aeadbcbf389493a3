//! WebSocket Connection
//!
//! A browser-style WebSocket client on top of tokio-tungstenite.
//! Frames and state changes are pushed into the event loop as
//! [`SocketEvent`]s, the same way a page receives `open`/`message`/`close`.

mod connection;
mod event;

pub use connection::Connection;
pub use event::*;
