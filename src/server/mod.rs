//! Flip Server
//!
//! The WebSocket endpoint the inbox talks to. Each text frame is decoded as
//! a point and answered with its coordinates swapped.

mod flip;
mod listener;

pub use flip::*;
pub use listener::*;
