use std::time::Duration;

use super::ProtocolError;
use crate::device::{Command, CommandKind};

/// Render the request body for `command`.
pub fn encode_request(command: &Command) -> String {
    match command.pause_duration() {
        Some(duration) => format!("{} {}", command.kind().wire_name(), duration.as_secs_f64()),
        None => command.kind().wire_name().to_string(),
    }
}

/// Parse a request body into a [`Command`].
///
/// Leading and trailing whitespace is ignored. Only `pauseStimulation` accepts
/// a parameter, which must be a finite, non-negative number of seconds.
pub fn parse_request(body: &str) -> Result<Command, ProtocolError> {
    let mut tokens = body.split_whitespace();
    let name = tokens.next().ok_or(ProtocolError::Empty)?;
    let kind =
        CommandKind::from_wire(name).ok_or_else(|| ProtocolError::UnknownCommand(name.to_string()))?;

    let parameter = tokens.next();
    if tokens.next().is_some() {
        return Err(ProtocolError::UnexpectedParameter {
            command: name.to_string(),
        });
    }

    match (kind, parameter) {
        (_, None) => Ok(Command::new(kind)),
        (CommandKind::PauseStimulation, Some(raw)) => {
            let duration = parse_seconds(raw).ok_or_else(|| ProtocolError::InvalidDuration {
                command: name.to_string(),
                value: raw.to_string(),
            })?;
            Ok(Command::pause_stimulation(Some(duration)))
        }
        (_, Some(_)) => Err(ProtocolError::UnexpectedParameter {
            command: name.to_string(),
        }),
    }
}

fn parse_seconds(raw: &str) -> Option<Duration> {
    let seconds: f64 = raw.parse().ok()?;
    Duration::try_from_secs_f64(seconds).ok()
}
