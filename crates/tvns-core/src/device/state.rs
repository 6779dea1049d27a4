use std::fmt;

use serde::{Deserialize, Serialize};

use super::CommandKind;

/// tVNS-R device state machine
///
/// Design principle: this is a pure type state machine with only state
/// definitions and transition validation. Serialized access and failure
/// injection are handled by the application layer (tvns-app).
///
/// State transitions:
/// ```text
///   Disconnected
///    │ initialise
///    ▼
///   Idle ◄──────────── initialise (idempotent)
///    │ ▲
///    │ │ stopTreatment
///    │ │
///    │ startTreatment
///    ▼ │
///   TreatmentActive ◄──────────────────────────┐
///    │                                          │
///    │ startStimulation                         │ stopStimulation
///    ▼                                          │
///   StimulationActive ──── pauseStimulation ──► StimulationPaused
///    │                                          │
///    └────────────── stopStimulation ───────────┘
/// ```
///
/// Every other (state, command) pair is illegal and leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceState {
    /// No connection to the stimulator has been initialised yet
    #[default]
    Disconnected,

    /// Connected, no treatment running
    Idle,

    /// Treatment bracket open, no stimulation delivered
    TreatmentActive,

    /// Stimulation pulses are being delivered
    StimulationActive,

    /// Stimulation paused inside an open treatment
    StimulationPaused,
}

/// Rejection produced when a command is issued outside its required states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{command} is not allowed while the device is {state}")]
pub struct IllegalTransition {
    pub state: DeviceState,
    pub command: CommandKind,
}

impl DeviceState {
    pub const ALL: [DeviceState; 5] = [
        Self::Disconnected,
        Self::Idle,
        Self::TreatmentActive,
        Self::StimulationActive,
        Self::StimulationPaused,
    ];

    /// Check whether `command` may be applied in this state
    pub fn permits(self, command: CommandKind) -> bool {
        command.required_states().contains(&self)
    }

    /// Get the state reached by applying `command`.
    ///
    /// Returns `Err` without any side effect when the command is illegal here.
    pub fn apply(self, command: CommandKind) -> Result<DeviceState, IllegalTransition> {
        if self.permits(command) {
            Ok(command.resulting_state())
        } else {
            Err(IllegalTransition {
                state: self,
                command,
            })
        }
    }

    /// Check if a stimulation is open, running or paused.
    ///
    /// These are exactly the states `stopStimulation` is accepted in.
    pub fn in_stimulation(self) -> bool {
        matches!(self, Self::StimulationActive | Self::StimulationPaused)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "Disconnected",
            Self::Idle => "Idle",
            Self::TreatmentActive => "TreatmentActive",
            Self::StimulationActive => "StimulationActive",
            Self::StimulationPaused => "StimulationPaused",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
