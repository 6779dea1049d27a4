use serde::{Deserialize, Serialize};

use crate::device::{CommandOutcome, DeviceState};

/// `chrono` format for [`CommandResponse::timestamp`], e.g. `14:03:27.481`
pub const RESPONSE_TIME_FORMAT: &str = "%H:%M:%S%.3f";

/// Response class carried in the body and mirrored by the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseOutcome {
    /// Command applied, `state` is the new device state
    Success,
    /// Command not valid in the current state, `state` is the current one
    IllegalState,
    /// Device fault, `state` is unchanged
    Failed,
    /// Body did not name a known command
    Unrecognized,
}

impl ResponseOutcome {
    pub fn status_code(self) -> u16 {
        match self {
            Self::Success => 200,
            Self::IllegalState => 409,
            Self::Failed => 503,
            Self::Unrecognized => 400,
        }
    }
}

impl From<CommandOutcome> for ResponseOutcome {
    fn from(outcome: CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Accepted => Self::Success,
            CommandOutcome::RejectedIllegalState => Self::IllegalState,
            CommandOutcome::SimulatedFailure => Self::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResponse {
    pub outcome: ResponseOutcome,
    pub state: DeviceState,
    pub message: String,
    pub timestamp: String,
}

impl CommandResponse {
    pub fn status_code(&self) -> u16 {
        self.outcome.status_code()
    }
}
