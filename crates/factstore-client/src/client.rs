//! Connection management and the RPC call into the FactStore server.

use std::time::Duration;

use factstore_core::FactstoreError;

use crate::mutation::Request;
use crate::response::Response;

/// Errors from client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid value: {0}")]
    Value(String),

    #[error("Invalid facet: {0}")]
    Facet(String),

    #[error("Geo error: {0}")]
    Geo(String),

    #[error("Malformed response: {0}")]
    Response(String),

    #[error(transparent)]
    Core(#[from] FactstoreError),
}

/// Configuration for connecting to a FactStore server.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `host:port` of the server's plain-text endpoint.
    pub addr: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Synchronous FactStore client over an insecure channel.
///
/// One blocking call in flight at a time; every error surfaces immediately
/// to the caller. The connection is held for the client's lifetime.
#[derive(Debug)]
pub struct Client {
    agent: ureq::Agent,
    base: String,
}

impl Client {
    /// Connect to the server and verify it is reachable.
    pub fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build()
            .new_agent();
        let base = format!("http://{}", config.addr);

        let response = agent
            .get(&format!("{base}/health"))
            .call()
            .map_err(|e| ClientError::Connection(format!("{}: {e}", config.addr)))?;
        let status = response.status().as_u16();
        if status >= 400 {
            return Err(ClientError::Connection(format!(
                "{}: health check returned {status}",
                config.addr
            )));
        }

        tracing::info!(addr = %config.addr, "Connected to FactStore");
        Ok(Self { agent, base })
    }

    /// Submit one request: the mutation batch is applied atomically, then
    /// any query text runs against the updated graph.
    pub fn run(&self, request: Request) -> Result<Response, ClientError> {
        let response = self
            .agent
            .post(&format!("{}/run", self.base))
            .send_json(&request)
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        if status >= 400 {
            let message = response.into_body().read_to_string().unwrap_or_default();
            return Err(ClientError::Server { status, message });
        }

        response
            .into_body()
            .read_json::<Response>()
            .map_err(|e| ClientError::Response(e.to_string()))
    }
}
