//! Audit trail records written by the client session.
//!
//! One [`LogEntry`] is produced per command invocation, whatever its outcome.

use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// `chrono` format of the leading timestamp in an audit line
pub const AUDIT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Client-side classification of one command attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditOutcome {
    Success,
    Rejected,
    SimulatedFailure,
    TransportError,
}

impl AuditOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Rejected => "rejected",
            Self::SimulatedFailure => "simulated_failure",
            Self::TransportError => "transport_error",
        }
    }
}

impl fmt::Display for AuditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub event: String,
    pub outcome: AuditOutcome,
    pub detail: Option<String>,
}

impl LogEntry {
    pub fn new(timestamp: DateTime<Local>, event: impl Into<String>, outcome: AuditOutcome) -> Self {
        Self {
            timestamp,
            event: event.into(),
            outcome,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Render the entry as a single audit line (without trailing newline).
    ///
    /// Format: `YYYY-MM-DD HH:MM:SS.mmm - [Participant: <name> - ]<event> - <outcome>[ - <detail>]`
    pub fn format_line(&self, participant: Option<&str>) -> String {
        let mut line = self.timestamp.format(AUDIT_TIME_FORMAT).to_string();
        if let Some(name) = participant {
            line.push_str(" - Participant: ");
            line.push_str(name);
        }
        line.push_str(" - ");
        line.push_str(&self.event);
        line.push_str(" - ");
        line.push_str(self.outcome.as_str());
        if let Some(detail) = &self.detail {
            // Keep one event per line
            line.push_str(" - ");
            line.push_str(&detail.replace(['\r', '\n'], " "));
        }
        line
    }
}
