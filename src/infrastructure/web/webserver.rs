use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tvns_app::DeviceController;

use super::routes::command;
use crate::bootstrap::wiring::build_device_controller;
use crate::config::ServerSetting;

/// HTTP front of the simulated device.
///
/// All connections share one [`DeviceController`], so concurrent clients act on
/// the same device and see each other's state changes.
pub struct MockServer {
    addr: SocketAddr,
    controller: Arc<DeviceController>,
}

impl MockServer {
    pub fn new(addr: SocketAddr, controller: Arc<DeviceController>) -> Self {
        Self { addr, controller }
    }

    /// Build a disconnected device from the server settings.
    pub fn from_setting(setting: &ServerSetting) -> Result<Self> {
        let addr = setting.bind_addr()?;
        let controller = build_device_controller(setting.failure_probability, setting.seed);
        Ok(Self::new(addr, controller))
    }

    pub fn controller(&self) -> &Arc<DeviceController> {
        &self.controller
    }

    /// Bind the listener and return the actual address with the serving future.
    ///
    /// Binding to port 0 picks an ephemeral port. The future completes once
    /// `shutdown` resolves and in-flight requests have been answered.
    pub fn bind(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(SocketAddr, impl Future<Output = ()> + 'static)> {
        let routes = command::route(self.controller);
        warp::serve(routes)
            .try_bind_with_graceful_shutdown(self.addr, shutdown)
            .with_context(|| format!("无法绑定地址 {}", self.addr))
    }

    /// Serve until `shutdown` resolves.
    pub async fn run_until(self, shutdown: impl Future<Output = ()> + Send + 'static) -> Result<()> {
        let probability = self.controller().failure_probability();
        let (addr, server) = self.bind(shutdown)?;
        info!(
            %addr,
            failure_probability = probability.value(),
            "Serving on port {} with {} failure probability",
            addr.port(),
            probability
        );
        server.await;
        info!("mock server stopped");
        Ok(())
    }
}
