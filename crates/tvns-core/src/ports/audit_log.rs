use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::audit::LogEntry;

#[derive(Debug, Error)]
pub enum AuditLogError {
    #[error("failed to open audit log {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write audit log {target}: {source}")]
    Write {
        target: String,
        #[source]
        source: io::Error,
    },
}

/// Append-only sink for audit entries.
///
/// `append` returns only once the entry has been handed to the sink, and
/// concurrent callers are serialized so the sink order matches call order.
pub trait AuditLogPort: Send + Sync {
    fn append(&self, entry: &LogEntry) -> Result<(), AuditLogError>;
}
