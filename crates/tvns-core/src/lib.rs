//! # tvns-core
//!
//! Core domain models and wire protocol for the tVNS-R remote triggering tools.
//!
//! This crate contains pure domain logic without any infrastructure dependencies:
//! the device state machine, the command vocabulary, the HTTP body format shared
//! by the mock server and the client session, and the ports implemented by
//! `tvns-infra`.

pub mod audit;
pub mod device;
pub mod failure;
pub mod ports;
pub mod protocol;

// Re-export commonly used types at the crate root
pub use audit::{AuditOutcome, LogEntry};
pub use device::{Command, CommandKind, CommandOutcome, DeviceState, IllegalTransition};
pub use failure::{FailureProbability, InvalidProbability};
pub use protocol::{CommandResponse, ProtocolError, ResponseOutcome};
