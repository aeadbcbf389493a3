use futures_util::{SinkExt, StreamExt};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU32, Ordering};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use url::Url;

use crate::config::ClientConfig;
use crate::event_loop::EventQueue;
use crate::socket::{ABNORMAL_CLOSURE, Payload, ReadyState, SocketEvent};
use crate::{Error, Result};

static NEXT_CONNECTION_ID: AtomicU32 = AtomicU32::new(1);

enum Outgoing {
    Text(String),
    Close { code: u16, reason: String },
}

/// Handle to a single outbound WebSocket connection.
///
/// The handshake and frame I/O run on a tokio task; every state change is
/// reported to the owning event loop as a [`SocketEvent`].
pub struct Connection {
    id: u32,
    url: Url,
    sender: mpsc::UnboundedSender<Outgoing>,
    ready_state: Arc<AtomicU8>,
    task: JoinHandle<()>,
}

impl Connection {
    /// Start connecting in the background. Returns immediately in `Connecting` state.
    pub fn open(config: &ClientConfig, events: EventQueue) -> Self {
        let id = NEXT_CONNECTION_ID.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel::<Outgoing>();
        let ready_state = Arc::new(AtomicU8::new(ReadyState::Connecting as u8));

        log::info!("[WebSocket {}] Connecting to {}", id, config.endpoint);

        let task = tokio::spawn(run_connection(
            id,
            config.clone(),
            ready_state.clone(),
            rx,
            events,
        ));

        Self {
            id,
            url: config.endpoint.clone(),
            sender: tx,
            ready_state,
            task,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from_u8(self.ready_state.load(Ordering::SeqCst))
    }

    /// Send a text message.
    ///
    /// Fails while still connecting. Once closing or closed the data is
    /// dropped without an error, as browsers do.
    pub fn send(&self, data: impl Into<String>) -> Result<()> {
        match self.ready_state() {
            ReadyState::Connecting => Err(Error::StillConnecting),
            ReadyState::Open => self
                .sender
                .send(Outgoing::Text(data.into()))
                .map_err(|_| Error::ConnectionGone),
            ReadyState::Closing | ReadyState::Closed => {
                log::debug!("[WebSocket {}] Discarding send on closed connection", self.id);
                Ok(())
            }
        }
    }

    /// Start the closing handshake.
    pub fn close(&self, code: u16, reason: impl Into<String>) {
        let state = self.ready_state();
        if matches!(state, ReadyState::Closing | ReadyState::Closed) {
            return;
        }

        self.ready_state
            .store(ReadyState::Closing as u8, Ordering::SeqCst);
        log::info!("[WebSocket {}] Closing", self.id);

        let reason = reason.into();
        if self.sender.send(Outgoing::Close { code, reason }).is_err() {
            log::debug!("[WebSocket {}] Connection task already stopped", self.id);
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handshake(id: u32, config: &ClientConfig) -> Result<WebSocketStream<TcpStream>> {
    let addr = config.address()?;
    log::info!("[WebSocket {}] Connecting TCP to {}", id, addr);

    let tcp_stream = TcpStream::connect(&addr).await?;
    log::info!("[WebSocket {}] TCP connected", id);

    let mut request = config.endpoint.as_str().into_client_request()?;
    if let Some(origin) = &config.origin {
        request
            .headers_mut()
            .insert("Origin", HeaderValue::from_str(origin)?);
    }
    if !config.protocols.is_empty() {
        request.headers_mut().insert(
            "Sec-WebSocket-Protocol",
            HeaderValue::from_str(&config.protocols.join(", "))?,
        );
    }

    log::info!("[WebSocket {}] Performing WebSocket handshake", id);
    let (stream, response) = tokio_tungstenite::client_async(request, tcp_stream).await?;
    log::info!(
        "[WebSocket {}] Connected successfully (status: {})",
        id,
        response.status()
    );

    Ok(stream)
}

async fn run_connection(
    id: u32,
    config: ClientConfig,
    ready_state: Arc<AtomicU8>,
    mut outgoing: mpsc::UnboundedReceiver<Outgoing>,
    events: EventQueue,
) {
    let ws_stream = match handshake(id, &config).await {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("[WebSocket {}] Connection failed: {}", id, e);
            ready_state.store(ReadyState::Closed as u8, Ordering::SeqCst);
            events.push(SocketEvent::Error(e.to_string()));
            events.push(SocketEvent::Close {
                code: ABNORMAL_CLOSURE,
                reason: String::new(),
            });
            return;
        }
    };

    // A close() issued during the handshake keeps the Closing state and
    // suppresses the open event; the queued close frame goes out below.
    if ready_state
        .compare_exchange(
            ReadyState::Connecting as u8,
            ReadyState::Open as u8,
            Ordering::SeqCst,
            Ordering::SeqCst,
        )
        .is_ok()
    {
        events.push(SocketEvent::Open);
    }

    let (mut write, mut read) = ws_stream.split();

    let send_task = tokio::spawn(async move {
        while let Some(out) = outgoing.recv().await {
            let (msg, closing) = match out {
                Outgoing::Text(text) => {
                    log::debug!("[WebSocket {}] Sending {} bytes", id, text.len());
                    (Message::Text(text.into()), false)
                }
                Outgoing::Close { code, reason } => (
                    Message::Close(Some(CloseFrame {
                        code: CloseCode::from(code),
                        reason: reason.into(),
                    })),
                    true,
                ),
            };
            if let Err(e) = write.send(msg).await {
                log::error!("[WebSocket {}] Send error: {}", id, e);
                break;
            }
            if closing {
                break;
            }
        }
    });

    let mut close_dispatched = false;
    while let Some(msg_result) = read.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                log::debug!("[WebSocket {}] Received {} bytes", id, text.as_str().len());
                events.push(SocketEvent::Message(Payload::Text(text.as_str().to_string())));
            }
            Ok(Message::Binary(data)) => {
                log::debug!("[WebSocket {}] Received binary ({} bytes)", id, data.len());
                events.push(SocketEvent::Message(Payload::Binary(data.to_vec())));
            }
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // Handled by tungstenite
            }
            Ok(Message::Close(frame)) => {
                let (code, reason) = frame
                    .map(|f| (f.code.into(), f.reason.as_str().to_string()))
                    .unwrap_or((1005, String::new()));
                log::info!("[WebSocket {}] Received close: {} {}", id, code, reason);
                ready_state.store(ReadyState::Closed as u8, Ordering::SeqCst);
                events.push(SocketEvent::Close { code, reason });
                // Keep reading so tungstenite flushes the close reply and ends the stream
                close_dispatched = true;
            }
            Ok(Message::Frame(_)) => {}
            Err(_) if close_dispatched => break,
            Err(e) => {
                log::error!("[WebSocket {}] Read error: {}", id, e);
                ready_state.store(ReadyState::Closed as u8, Ordering::SeqCst);
                events.push(SocketEvent::Error(e.to_string()));
                events.push(SocketEvent::Close {
                    code: ABNORMAL_CLOSURE,
                    reason: String::new(),
                });
                close_dispatched = true;
                break;
            }
        }
    }

    if !close_dispatched {
        ready_state.store(ReadyState::Closed as u8, Ordering::SeqCst);
        events.push(SocketEvent::Close {
            code: ABNORMAL_CLOSURE,
            reason: String::new(),
        });
    }

    send_task.abort();
    log::info!("[WebSocket {}] Connection ended", id);
}
