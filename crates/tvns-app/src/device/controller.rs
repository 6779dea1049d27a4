//! Simulated tVNS-R device
//! 模拟的 tVNS-R 设备

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, warn};
use tvns_core::device::{Command, CommandOutcome, DeviceState};
use tvns_core::ports::ClockPort;
use tvns_core::protocol::{parse_request, CommandResponse, ResponseOutcome, RESPONSE_TIME_FORMAT};
use tvns_core::FailureProbability;

use super::FailureInjector;

/// Result of evaluating one command against the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub command: Command,
    pub outcome: CommandOutcome,
    /// New state when accepted, current (unchanged) state otherwise
    pub state: DeviceState,
    /// State the device was in when the command arrived
    pub previous: DeviceState,
}

impl CommandResult {
    pub fn message(&self) -> String {
        let kind = self.command.kind();
        match self.outcome {
            CommandOutcome::Accepted => match self.command.pause_duration() {
                Some(duration) => format!(
                    "{} for {} seconds",
                    kind.success_message(),
                    duration.as_secs_f64()
                ),
                None => kind.success_message().to_string(),
            },
            CommandOutcome::RejectedIllegalState => {
                format!("{kind} is not allowed while the device is {}", self.previous)
            }
            CommandOutcome::SimulatedFailure => kind.failure_message().to_string(),
        }
    }
}

/// Single authoritative owner of the device state.
///
/// ## Behavior / 行为
/// - Legality is checked first; an illegal command is rejected without a random draw
/// - Only a legal command consults the [`FailureInjector`]
/// - State is written only when the command is accepted
/// - The whole read-check-mutate sequence runs under one mutex, so concurrent
///   HTTP handlers are serialized. All clients share this one state.
pub struct DeviceController {
    inner: Mutex<ControllerInner>,
    clock: Arc<dyn ClockPort>,
}

struct ControllerInner {
    state: DeviceState,
    injector: FailureInjector,
}

impl DeviceController {
    /// Create a controller for a freshly powered, disconnected device.
    pub fn new(injector: FailureInjector, clock: Arc<dyn ClockPort>) -> Self {
        Self::with_initial_state(DeviceState::Disconnected, injector, clock)
    }

    pub fn with_initial_state(
        state: DeviceState,
        injector: FailureInjector,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            inner: Mutex::new(ControllerInner { state, injector }),
            clock,
        }
    }

    pub fn state(&self) -> DeviceState {
        self.lock().state
    }

    pub fn failure_probability(&self) -> FailureProbability {
        self.lock().injector.probability()
    }

    /// Evaluate one command and apply it if accepted.
    pub fn execute(&self, command: &Command) -> CommandResult {
        let kind = command.kind();
        let mut inner = self.lock();
        let previous = inner.state;

        let next = match previous.apply(kind) {
            Ok(next) => next,
            Err(illegal) => {
                info!(command = %kind, state = %previous, "{illegal}");
                return CommandResult {
                    command: *command,
                    outcome: CommandOutcome::RejectedIllegalState,
                    state: previous,
                    previous,
                };
            }
        };

        if inner.injector.should_fail() {
            warn!(command = %kind, state = %previous, "simulated device failure");
            return CommandResult {
                command: *command,
                outcome: CommandOutcome::SimulatedFailure,
                state: previous,
                previous,
            };
        }

        inner.state = next;
        info!(command = %command, from = %previous, to = %next, "command accepted");
        CommandResult {
            command: *command,
            outcome: CommandOutcome::Accepted,
            state: next,
            previous,
        }
    }

    /// Evaluate a command and build the wire response for it.
    pub fn respond(&self, command: &Command) -> CommandResponse {
        let result = self.execute(command);
        CommandResponse {
            outcome: result.outcome.into(),
            state: result.state,
            message: result.message(),
            timestamp: self.timestamp(),
        }
    }

    /// Parse a raw request body and respond to it.
    ///
    /// Bodies that do not name a known command are answered with
    /// [`ResponseOutcome::Unrecognized`] and never touch the state.
    pub fn handle_body(&self, body: &str) -> CommandResponse {
        match parse_request(body) {
            Ok(command) => self.respond(&command),
            Err(err) => {
                debug!(error = %err, "unrecognized request body");
                CommandResponse {
                    outcome: ResponseOutcome::Unrecognized,
                    state: self.state(),
                    message: format!("The command was not recognized: {err}"),
                    timestamp: self.timestamp(),
                }
            }
        }
    }

    fn timestamp(&self) -> String {
        self.clock.now().format(RESPONSE_TIME_FORMAT).to_string()
    }

    fn lock(&self) -> MutexGuard<'_, ControllerInner> {
        // A panic mid-command never leaves a half-written state: the state is a
        // single Copy value assigned last.
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
