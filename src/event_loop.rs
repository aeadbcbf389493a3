//! Event Loop
//!
//! A single-consumer queue that socket tasks and the UI push events into.
//! Events are dispatched one at a time, in arrival order, to the listeners
//! registered for their kind.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::page::SEND_BUTTON;
use crate::session::Session;
use crate::socket::{ReadyState, SocketEvent};

/// Events that can be pushed into the loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Socket(SocketEvent),
    /// The user changed the value of an input.
    Input { target: String, value: String },
    /// The user clicked an element.
    Click { target: String },
    /// Stop the loop.
    Shutdown,
}

impl From<SocketEvent> for Event {
    fn from(event: SocketEvent) -> Self {
        Event::Socket(event)
    }
}

/// Sources a listener can be bound to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventKind {
    Open,
    Message,
    Error,
    Close,
    Input(String),
    Click(String),
}

impl Event {
    pub fn kind(&self) -> Option<EventKind> {
        match self {
            Event::Socket(SocketEvent::Open) => Some(EventKind::Open),
            Event::Socket(SocketEvent::Message(_)) => Some(EventKind::Message),
            Event::Socket(SocketEvent::Error(_)) => Some(EventKind::Error),
            Event::Socket(SocketEvent::Close { .. }) => Some(EventKind::Close),
            Event::Input { target, .. } => Some(EventKind::Input(target.clone())),
            Event::Click { target } => Some(EventKind::Click(target.clone())),
            Event::Shutdown => None,
        }
    }
}

/// Producer handle for the event loop.
///
/// This is cheap to clone and can be shared across tasks.
#[derive(Clone)]
pub struct EventQueue {
    sender: mpsc::UnboundedSender<Event>,
}

impl EventQueue {
    pub fn push(&self, event: impl Into<Event>) {
        if let Err(e) = self.sender.send(event.into()) {
            log::warn!("Event loop is gone, dropping {:?}", e.0);
        }
    }

    pub fn input(&self, target: impl Into<String>, value: impl Into<String>) {
        self.push(Event::Input {
            target: target.into(),
            value: value.into(),
        });
    }

    pub fn click(&self, target: impl Into<String>) {
        self.push(Event::Click {
            target: target.into(),
        });
    }

    pub fn shutdown(&self) {
        self.push(Event::Shutdown);
    }
}

type Listener = Box<dyn FnMut(&mut Session, &Event) + Send>;

pub struct EventLoop {
    queue: EventQueue,
    receiver: mpsc::UnboundedReceiver<Event>,
    listeners: Vec<(EventKind, Listener)>,
}

impl Default for EventLoop {
    fn default() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            queue: EventQueue { sender },
            receiver,
            listeners: vec![],
        }
    }
}

impl EventLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue(&self) -> EventQueue {
        self.queue.clone()
    }

    /// Bind a listener to a source. Listeners run in registration order.
    pub fn add_event_listener<F>(&mut self, kind: EventKind, listener: F)
    where
        F: FnMut(&mut Session, &Event) + Send + 'static,
    {
        self.listeners.push((kind, Box::new(listener)));
    }

    /// Wait for the next event and dispatch it.
    ///
    /// Returns the kind that was dispatched, or `None` once a shutdown event
    /// is received.
    pub async fn dispatch_next(&mut self, session: &mut Session) -> Option<EventKind> {
        let event = self.receiver.recv().await?;
        let kind = event.kind()?;

        if let Event::Input { target, value } = &event {
            if let Err(e) = session.document_mut().set_value(target, value.as_str()) {
                log::warn!("Ignoring input event: {}", e);
            }
        }

        for (bound, listener) in self.listeners.iter_mut() {
            if *bound == kind {
                listener(session, &event);
            }
        }

        Some(kind)
    }

    /// Dispatch events until shutdown.
    pub async fn run(&mut self, session: &mut Session) {
        log::info!("Event loop started");
        while self.dispatch_next(session).await.is_some() {}
        log::info!("Event loop stopped");
    }

    /// Start the closing handshake and keep dispatching until the close event
    /// has been handled or `limit` elapses. Returns whether the close completed.
    pub async fn close_and_wait(&mut self, session: &mut Session, limit: Duration) -> bool {
        if session.socket().ready_state() == ReadyState::Closed {
            return true;
        }
        session.socket().close(1000, "");

        let drained = tokio::time::timeout(limit, async {
            loop {
                if self.dispatch_next(session).await == Some(EventKind::Close) {
                    break;
                }
            }
        })
        .await;

        if drained.is_err() {
            log::warn!(
                "[WebSocket {}] Close handshake did not finish within {:?}",
                session.socket().id(),
                limit
            );
        }
        drained.is_ok()
    }
}

/// Bind the inbox handlers: inbound messages are rendered into the list and
/// clicks on the send button transmit the inputs.
pub fn bind_inbox_handlers(event_loop: &mut EventLoop) {
    event_loop.add_event_listener(EventKind::Message, |session, event| {
        if let Event::Socket(SocketEvent::Message(payload)) = event {
            session.on_message(payload);
        }
    });

    event_loop.add_event_listener(EventKind::Click(SEND_BUTTON.to_string()), |session, _| {
        if let Err(e) = session.on_send_click() {
            log::warn!("[WebSocket {}] send failed: {}", session.socket().id(), e);
        }
    });
}
