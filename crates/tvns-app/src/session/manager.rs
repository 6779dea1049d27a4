//! Client session for a tVNS-R endpoint
//! tVNS-R 客户端会话

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, info_span, warn, Instrument};
use tvns_core::device::{Command, CommandKind, DeviceState};
use tvns_core::ports::{
    AuditLogPort, ClockPort, CommandTransportPort, TransportError, TransportReply,
};
use tvns_core::protocol::{CommandResponse, ResponseOutcome};
use tvns_core::{AuditOutcome, LogEntry};

use super::SessionError;

/// Successful command as confirmed by the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandReport {
    pub command: CommandKind,
    pub state: DeviceState,
    pub message: String,
}

/// Issues commands to a device endpoint and keeps the audit trail.
///
/// ## Behavior / 行为
/// - Commands are sent in whatever order the caller chooses; legality is
///   decided by the device, never checked here
/// - Exactly one audit entry is written per command, including transport
///   failures
/// - A command is reported successful only after its audit entry is written
/// - Nothing is retried automatically
pub struct TvnsManager {
    transport: Arc<dyn CommandTransportPort>,
    audit: Arc<dyn AuditLogPort>,
    clock: Arc<dyn ClockPort>,
    last_known_state: Option<DeviceState>,
}

impl TvnsManager {
    pub fn new(
        transport: Arc<dyn CommandTransportPort>,
        audit: Arc<dyn AuditLogPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            transport,
            audit,
            clock,
            last_known_state: None,
        }
    }

    /// Device state reported by the most recent answered command.
    ///
    /// `None` before the first answer and after a transport failure, since the
    /// device may or may not have acted on a request that timed out.
    pub fn last_known_state(&self) -> Option<DeviceState> {
        self.last_known_state
    }

    pub async fn initialize_connection(&mut self) -> Result<CommandReport, SessionError> {
        self.execute(Command::initialize()).await
    }

    pub async fn start_treatment(&mut self) -> Result<CommandReport, SessionError> {
        self.execute(Command::start_treatment()).await
    }

    pub async fn stop_treatment(&mut self) -> Result<CommandReport, SessionError> {
        self.execute(Command::stop_treatment()).await
    }

    pub async fn start_stimulation(&mut self) -> Result<CommandReport, SessionError> {
        self.execute(Command::start_stimulation()).await
    }

    pub async fn pause_stimulation(
        &mut self,
        duration: Duration,
    ) -> Result<CommandReport, SessionError> {
        self.execute(Command::pause_stimulation(Some(duration))).await
    }

    pub async fn stop_stimulation(&mut self) -> Result<CommandReport, SessionError> {
        self.execute(Command::stop_stimulation()).await
    }

    /// Deliver one stimulation burst of `duration`.
    ///
    /// Stops an open stimulation (running or paused) first, then starts, waits
    /// and stops again.
    /// Every step is an ordinary logged command; the first failing step ends
    /// the pulse with its error.
    pub async fn pulse(&mut self, duration: Duration) -> Result<CommandReport, SessionError> {
        if self
            .last_known_state
            .is_some_and(DeviceState::in_stimulation)
        {
            self.stop_stimulation().await?;
        }
        self.start_stimulation().await?;
        tokio::time::sleep(duration).await;
        self.stop_stimulation().await
    }

    /// Send one command, classify the answer and record it.
    pub async fn execute(&mut self, command: Command) -> Result<CommandReport, SessionError> {
        let kind = command.kind();
        let span = info_span!("session.execute", command = %kind);

        async {
            let reply = self.transport.send(&command).await;
            let result = classify(kind, reply);
            self.observe(&result);

            if let Some(entry) = audit_entry(self.clock.as_ref(), kind, &result) {
                self.audit
                    .append(&entry)
                    .map_err(|source| SessionError::LogWrite {
                        command: kind,
                        source,
                    })?;
            }

            match &result {
                Ok(report) => info!(state = %report.state, "{}", report.message),
                Err(err) => warn!(error = %err, "command did not succeed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    fn observe(&mut self, result: &Result<CommandReport, SessionError>) {
        self.last_known_state = match result {
            Ok(report) => Some(report.state),
            Err(SessionError::IllegalState { state, .. })
            | Err(SessionError::SimulatedFailure { state, .. }) => Some(*state),
            Err(SessionError::Transport { .. }) => None,
            Err(SessionError::LogWrite { .. }) => self.last_known_state,
        };
    }
}

/// Map a raw reply onto the session outcome classes.
fn classify(
    command: CommandKind,
    reply: Result<TransportReply, TransportError>,
) -> Result<CommandReport, SessionError> {
    let transport_error = |source| SessionError::Transport { command, source };

    let reply = reply.map_err(transport_error)?;
    let response: CommandResponse = serde_json::from_str(&reply.body).map_err(|e| {
        transport_error(TransportError::UnexpectedResponse(format!(
            "status {} with unreadable body: {e}",
            reply.status
        )))
    })?;

    match (reply.status, response.outcome) {
        (200, ResponseOutcome::Success) => Ok(CommandReport {
            command,
            state: response.state,
            message: response.message,
        }),
        (409, ResponseOutcome::IllegalState) => Err(SessionError::IllegalState {
            command,
            state: response.state,
            message: response.message,
        }),
        (503, ResponseOutcome::Failed) => Err(SessionError::SimulatedFailure {
            command,
            state: response.state,
            message: response.message,
        }),
        (status, outcome) => Err(transport_error(TransportError::UnexpectedResponse(
            format!("status {status} with outcome {outcome:?}: {}", response.message),
        ))),
    }
}

/// Build the audit entry for one finished attempt.
///
/// `None` only for an audit failure, which has nothing left to record.
fn audit_entry(
    clock: &dyn ClockPort,
    command: CommandKind,
    result: &Result<CommandReport, SessionError>,
) -> Option<LogEntry> {
    let (outcome, detail) = match result {
        Ok(report) => (AuditOutcome::Success, report.message.clone()),
        Err(err) => {
            let detail = match err {
                SessionError::IllegalState { state, message, .. } => {
                    format!("{message} (state: {state})")
                }
                SessionError::SimulatedFailure { message, .. } => message.clone(),
                SessionError::Transport { source, .. } => source.to_string(),
                SessionError::LogWrite { .. } => return None,
            };
            (err.audit_outcome()?, detail)
        }
    };
    Some(LogEntry::new(clock.now(), command.wire_name(), outcome).with_detail(detail))
}
