use tvns_core::device::{CommandKind, DeviceState};
use tvns_core::ports::{AuditLogError, TransportError};
use tvns_core::AuditOutcome;

/// Error type for a single session command.
///
/// Every variant names the command it belongs to, so an experiment script can
/// decide per class whether to retry, abort or compensate.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Command not valid in the device's current state. Recoverable by issuing
    /// the missing command first.
    #[error("{command} rejected, device is {state}: {message}")]
    IllegalState {
        command: CommandKind,
        state: DeviceState,
        message: String,
    },

    /// Device reported a fault. State is unchanged; retrying is the caller's call.
    #[error("{command} failed on the device: {message}")]
    SimulatedFailure {
        command: CommandKind,
        state: DeviceState,
        message: String,
    },

    /// The endpoint could not be reached or answered outside the protocol.
    /// The device state is unknown afterwards.
    #[error("{command} could not be delivered: {source}")]
    Transport {
        command: CommandKind,
        #[source]
        source: TransportError,
    },

    /// The audit entry could not be written. Fatal for the call, even when
    /// the device accepted the command.
    #[error("audit log write failed for {command}: {source}")]
    LogWrite {
        command: CommandKind,
        #[source]
        source: AuditLogError,
    },
}

impl SessionError {
    pub fn command(&self) -> CommandKind {
        match self {
            Self::IllegalState { command, .. }
            | Self::SimulatedFailure { command, .. }
            | Self::Transport { command, .. }
            | Self::LogWrite { command, .. } => *command,
        }
    }

    /// Audit classification of the attempt, `None` for audit failures
    pub fn audit_outcome(&self) -> Option<AuditOutcome> {
        match self {
            Self::IllegalState { .. } => Some(AuditOutcome::Rejected),
            Self::SimulatedFailure { .. } => Some(AuditOutcome::SimulatedFailure),
            Self::Transport { .. } => Some(AuditOutcome::TransportError),
            Self::LogWrite { .. } => None,
        }
    }

    /// Whether retrying or issuing a corrective command can make progress
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::LogWrite { .. })
    }
}
