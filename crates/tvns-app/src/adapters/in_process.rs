use std::sync::Arc;

use async_trait::async_trait;
use tvns_core::device::Command;
use tvns_core::ports::{CommandTransportPort, TransportError, TransportReply};

use crate::device::DeviceController;

/// Transport that hands commands straight to a local [`DeviceController`].
///
/// Produces the same status codes and JSON bodies as the HTTP mock server,
/// which lets a session run against a simulated device without a socket.
pub struct InProcessTransport {
    controller: Arc<DeviceController>,
}

impl InProcessTransport {
    pub fn new(controller: Arc<DeviceController>) -> Self {
        Self { controller }
    }
}

#[async_trait]
impl CommandTransportPort for InProcessTransport {
    async fn send(&self, command: &Command) -> Result<TransportReply, TransportError> {
        let response = self.controller.respond(command);
        let body = serde_json::to_string(&response)
            .map_err(|e| TransportError::Other(format!("failed to encode response: {e}")))?;
        Ok(TransportReply {
            status: response.status_code(),
            body,
        })
    }
}
