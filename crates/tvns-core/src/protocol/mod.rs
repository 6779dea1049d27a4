//! HTTP body format shared by the mock server and the client session.
//!
//! Requests are `text/plain`: the wire name of the command, optionally followed
//! by whitespace and a pause length in seconds (`pauseStimulation 1.5`).
//! Responses are JSON [`CommandResponse`] documents whose HTTP status matches
//! [`ResponseOutcome::status_code`].

mod request;
mod response;

pub use request::{encode_request, parse_request};
pub use response::{CommandResponse, ResponseOutcome, RESPONSE_TIME_FORMAT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("empty command body")]
    Empty,

    #[error("unrecognized command: {0}")]
    UnknownCommand(String),

    #[error("{command} does not take a parameter")]
    UnexpectedParameter { command: String },

    #[error("invalid pause duration for {command}: {value}")]
    InvalidDuration { command: String, value: String },
}
