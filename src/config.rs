//! Client Configuration
//!
//! Endpoint and handshake settings for the inbox connection.

use url::Url;

use crate::{Error, Result};

/// The fixed endpoint the inbox connects to unless told otherwise.
pub const DEFAULT_ENDPOINT: &str = "ws://localhost:8080";

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub endpoint: Url,
    /// Sent as the `Origin` header, the way a browser page would.
    pub origin: Option<String>,
    /// Sent as `Sec-WebSocket-Protocol` when non-empty.
    pub protocols: Vec<String>,
}

impl ClientConfig {
    /// Parse and validate an endpoint URL. Only plain `ws://` is supported.
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        if endpoint.scheme() != "ws" {
            return Err(Error::UnsupportedScheme(endpoint.scheme().to_string()));
        }
        if endpoint.host_str().is_none() {
            return Err(Error::MissingHost);
        }

        Ok(Self {
            endpoint,
            origin: None,
            protocols: vec![],
        })
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.protocols.push(protocol.into());
        self
    }

    /// `host:port` for the TCP connection, defaulting to port 80.
    pub fn address(&self) -> Result<String> {
        let host = self.endpoint.host_str().ok_or(Error::MissingHost)?;
        let port = self.endpoint.port().unwrap_or(80);
        Ok(format!("{}:{}", host, port))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            origin: None,
            protocols: vec![],
        }
    }
}
