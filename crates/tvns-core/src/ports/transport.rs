use async_trait::async_trait;
use thiserror::Error;

use crate::device::Command;

/// Raw HTTP reply, before any protocol interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportReply {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("transport error: {0}")]
    Other(String),
}

/// Delivers one command to the device endpoint.
#[async_trait]
pub trait CommandTransportPort: Send + Sync {
    async fn send(&self, command: &Command) -> Result<TransportReply, TransportError>;
}
