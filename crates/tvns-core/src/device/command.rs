use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::DeviceState;

/// Commands understood by the tVNS-R remote interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommandKind {
    Initialize,
    StartTreatment,
    StopTreatment,
    StartStimulation,
    PauseStimulation,
    StopStimulation,
}

impl CommandKind {
    pub const ALL: [CommandKind; 6] = [
        Self::Initialize,
        Self::StartTreatment,
        Self::StopTreatment,
        Self::StartStimulation,
        Self::PauseStimulation,
        Self::StopStimulation,
    ];

    /// Name used in request bodies, endpoint paths and audit lines.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::Initialize => "initialise",
            Self::StartTreatment => "startTreatment",
            Self::StopTreatment => "stopTreatment",
            Self::StartStimulation => "startStimulation",
            Self::PauseStimulation => "pauseStimulation",
            Self::StopStimulation => "stopStimulation",
        }
    }

    /// Resolve a wire name. `initialize` is accepted as an alias of `initialise`.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "initialise" | "initialize" => Some(Self::Initialize),
            "startTreatment" => Some(Self::StartTreatment),
            "stopTreatment" => Some(Self::StopTreatment),
            "startStimulation" => Some(Self::StartStimulation),
            "pauseStimulation" => Some(Self::PauseStimulation),
            "stopStimulation" => Some(Self::StopStimulation),
            _ => None,
        }
    }

    /// States in which this command is legal
    pub fn required_states(self) -> &'static [DeviceState] {
        use DeviceState::*;
        match self {
            Self::Initialize => &[Disconnected, Idle],
            Self::StartTreatment => &[Idle],
            Self::StartStimulation => &[TreatmentActive],
            Self::PauseStimulation => &[StimulationActive],
            Self::StopStimulation => &[StimulationActive, StimulationPaused],
            Self::StopTreatment => &[TreatmentActive],
        }
    }

    /// State the device ends up in after the command is accepted
    pub fn resulting_state(self) -> DeviceState {
        match self {
            Self::Initialize => DeviceState::Idle,
            Self::StartTreatment => DeviceState::TreatmentActive,
            Self::StartStimulation => DeviceState::StimulationActive,
            Self::PauseStimulation => DeviceState::StimulationPaused,
            Self::StopStimulation => DeviceState::TreatmentActive,
            Self::StopTreatment => DeviceState::Idle,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            Self::Initialize => "The tVNS-R device has been initialized",
            Self::StartTreatment => "Treatment started",
            Self::StopTreatment => "Treatment stopped",
            Self::StartStimulation => "Stimulation started",
            Self::PauseStimulation => "Stimulation paused",
            Self::StopStimulation => "Stimulation stopped",
        }
    }

    pub fn failure_message(self) -> &'static str {
        match self {
            Self::Initialize => "The tVNS-R device could not be initialized",
            Self::StartTreatment => "Treatment not started",
            Self::StopTreatment => "Treatment not stopped",
            Self::StartStimulation => "Stimulation not started",
            Self::PauseStimulation => "Stimulation not paused",
            Self::StopStimulation => "Stimulation not stopped",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// A single command invocation.
///
/// Only `PauseStimulation` carries a parameter (the requested pause length);
/// the constructors keep every other kind parameter-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Command {
    kind: CommandKind,
    pause: Option<Duration>,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self { kind, pause: None }
    }

    pub fn initialize() -> Self {
        Self::new(CommandKind::Initialize)
    }

    pub fn start_treatment() -> Self {
        Self::new(CommandKind::StartTreatment)
    }

    pub fn stop_treatment() -> Self {
        Self::new(CommandKind::StopTreatment)
    }

    pub fn start_stimulation() -> Self {
        Self::new(CommandKind::StartStimulation)
    }

    pub fn pause_stimulation(duration: Option<Duration>) -> Self {
        Self {
            kind: CommandKind::PauseStimulation,
            pause: duration,
        }
    }

    pub fn stop_stimulation() -> Self {
        Self::new(CommandKind::StopStimulation)
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn pause_duration(&self) -> Option<Duration> {
        self.pause
    }
}

impl From<CommandKind> for Command {
    fn from(kind: CommandKind) -> Self {
        Self::new(kind)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.pause {
            Some(duration) => write!(f, "{} ({}s)", self.kind, duration.as_secs_f64()),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Server-side result of evaluating one command.
///
/// Exactly one outcome is produced per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Accepted,
    RejectedIllegalState,
    SimulatedFailure,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_wire(kind.wire_name()), Some(kind));
        }
    }

    #[test]
    fn initialize_accepts_both_spellings() {
        assert_eq!(
            CommandKind::from_wire("initialize"),
            Some(CommandKind::Initialize)
        );
        assert_eq!(CommandKind::Initialize.wire_name(), "initialise");
    }

    #[test]
    fn unknown_wire_name_is_none() {
        assert_eq!(CommandKind::from_wire("reboot"), None);
        assert_eq!(CommandKind::from_wire("StartTreatment"), None);
        assert_eq!(CommandKind::from_wire(""), None);
    }

    #[test]
    fn only_pause_carries_duration() {
        let pause = Command::pause_stimulation(Some(Duration::from_millis(1500)));
        assert_eq!(pause.kind(), CommandKind::PauseStimulation);
        assert_eq!(pause.pause_duration(), Some(Duration::from_millis(1500)));
        assert_eq!(pause.to_string(), "pauseStimulation (1.5s)");

        let start: Command = CommandKind::StartTreatment.into();
        assert_eq!(start.pause_duration(), None);
        assert_eq!(start.to_string(), "startTreatment");
    }
}
