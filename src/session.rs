//! Connection Handler
//!
//! Owns the single connection and the page, and implements the two
//! handlers bound to them: rendering inbound messages and sending the
//! coordinate pair on click.

use crate::config::ClientConfig;
use crate::event_loop::EventQueue;
use crate::page::{Document, OutboundPoint, RenderSink, render_payload};
use crate::socket::{Connection, Payload};
use crate::Result;

pub struct Session {
    socket: Connection,
    document: Document,
}

impl Session {
    /// Open the connection and set up an empty page.
    pub fn connect(config: &ClientConfig, events: EventQueue, sink: Box<dyn RenderSink>) -> Self {
        Self {
            socket: Connection::open(config, events),
            document: Document::new(sink),
        }
    }

    pub fn socket(&self) -> &Connection {
        &self.socket
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Render an inbound payload as a new entry at the end of the inbox.
    pub fn on_message(&mut self, payload: &Payload) -> usize {
        let index = self.document.inbox_mut().append(render_payload(payload));
        log::debug!("[WebSocket {}] Rendered inbox entry {}", self.socket.id(), index);
        index
    }

    /// Read the inputs and transmit `{x, y}` once.
    pub fn on_send_click(&mut self) -> Result<OutboundPoint> {
        let point = self.document.read_point();
        let json = point.to_json()?;
        log::debug!("[WebSocket {}] Sending point {}", self.socket.id(), json);
        self.socket.send(json)?;
        Ok(point)
    }
}
