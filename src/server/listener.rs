use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::tungstenite::Message;

use crate::Result;
use crate::server::respond;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";

pub struct FlipServer {
    listener: TcpListener,
}

impl FlipServer {
    pub async fn bind(addr: &str) -> Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        log::info!("Flip server listening on {}", listener.local_addr()?);
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails, one task per connection.
    pub async fn run(self) -> Result<()> {
        loop {
            let (stream, peer) = self.listener.accept().await?;
            log::info!("Accepted connection from {}", peer);
            tokio::spawn(accept_connection(stream, peer));
        }
    }
}

async fn accept_connection(stream: TcpStream, peer: SocketAddr) {
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(stream) => stream,
        Err(e) => {
            log::error!("[{}] Handshake failed: {}", peer, e);
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();

    while let Some(msg_result) = read.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                let reply = respond(text.as_str());
                log::debug!("[{}] {} -> {}", peer, text.as_str(), reply);
                if let Err(e) = write.send(Message::Text(reply.into())).await {
                    log::error!("[{}] Send error: {}", peer, e);
                    break;
                }
            }
            Ok(Message::Close(_)) => {
                // Keep reading so tungstenite flushes the close reply and ends the stream
                log::info!("[{}] Received close", peer);
            }
            // Binary frames get no reply; ping/pong are handled by tungstenite
            Ok(_) => {}
            Err(e) => {
                log::error!("[{}] Read error: {}", peer, e);
                break;
            }
        }
    }

    log::info!("[{}] Connection ended", peer);
}
