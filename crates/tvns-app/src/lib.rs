//! Use cases for the tVNS-R tools.
//!
//! - [`device`]: the simulated device behind the mock server
//! - [`session`]: the client session that drives a device endpoint and keeps the audit trail
//! - [`adapters`]: glue that connects the two without a network

pub mod adapters;
pub mod device;
pub mod session;

pub use adapters::InProcessTransport;
pub use device::{CommandResult, DeviceController, FailureInjector};
pub use session::{CommandReport, SessionError, TvnsManager};
