//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases in `tvns-app` and the
//! adapters in `tvns-infra`, so the state machine and session logic stay
//! independent of sockets, files and entropy sources.

pub mod audit_log;
mod clock;
mod random;
pub mod transport;

pub use audit_log::{AuditLogError, AuditLogPort};
pub use clock::*;
pub use random::*;
pub use transport::{CommandTransportPort, TransportError, TransportReply};
