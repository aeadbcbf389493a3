//! # point_inbox
//!
//! A WebSocket inbox client. It opens one connection to a fixed endpoint,
//! renders every inbound message into an append-only list, and sends the
//! `{x, y}` pair from two inputs whenever the send button is clicked.
//!
//! ## Example
//!
//! ```no_run
//! use point_inbox::{ClientConfig, EventKind, EventLoop, NullSink, Session, bind_inbox_handlers};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut event_loop = EventLoop::new();
//!     bind_inbox_handlers(&mut event_loop);
//!
//!     let mut session = Session::connect(
//!         &ClientConfig::default(),
//!         event_loop.queue(),
//!         Box::new(NullSink),
//!     );
//!
//!     let queue = event_loop.queue();
//!     queue.input("x-input", "3");
//!     queue.input("y-input", "4");
//!     event_loop.add_event_listener(EventKind::Open, move |_, _| queue.click("send-btn"));
//!
//!     event_loop.run(&mut session).await;
//! }
//! ```
//!
//! The companion [`server::FlipServer`] answers each point with its
//! coordinates swapped.

pub mod config;
pub mod event_loop;
pub mod page;
pub mod server;
pub mod session;
pub mod socket;
pub mod terminal;

mod error;

pub use config::ClientConfig;
pub use error::{Error, Result};
pub use event_loop::{Event, EventKind, EventLoop, EventQueue, bind_inbox_handlers};
pub use page::*;
pub use session::Session;
pub use socket::{Connection, Payload, ReadyState, SocketEvent};
