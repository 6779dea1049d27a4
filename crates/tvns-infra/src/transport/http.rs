use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};
use tvns_core::device::{Command, CommandKind};
use tvns_core::ports::{CommandTransportPort, TransportError, TransportReply};
use tvns_core::protocol::encode_request;

/// Where the tVNS Manager listens by default
pub const DEFAULT_BASE_URL: &str = "http://localhost:51523/tvnsmanager/";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Sends commands as `text/plain` POSTs to `<base_url>/<wireName>`.
pub struct HttpCommandTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCommandTransport {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint_url(&self, kind: CommandKind) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), kind.wire_name())
    }
}

#[async_trait]
impl CommandTransportPort for HttpCommandTransport {
    async fn send(&self, command: &Command) -> Result<TransportReply, TransportError> {
        let url = self.endpoint_url(command.kind());
        debug!(%url, command = %command, "sending command");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(encode_request(command))
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_error)?;

        debug!(%url, status, "received reply");
        Ok(TransportReply { status, body })
    }
}

fn classify_error(err: reqwest::Error) -> TransportError {
    warn!(error = %err, "HTTP request failed");
    if err.is_timeout() {
        TransportError::Timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::Connect(err.to_string())
    } else {
        TransportError::Other(err.to_string())
    }
}
