use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Local;
use tracing::{debug, info};
use tvns_core::ports::{AuditLogError, AuditLogPort};
use tvns_core::LogEntry;

/// Audit log backed by a plain text file, one line per entry.
///
/// ## Behavior / 行为
/// - An existing file is never reused: the session writes to
///   `<path>_<YYYYmmddHHMMSS>.txt` instead, so earlier sessions stay intact
/// - Every append is written and flushed before returning
/// - Appends are serialized by a mutex, file order equals call order
pub struct FileAuditLog {
    path: PathBuf,
    participant: Option<String>,
    file: Mutex<File>,
}

impl FileAuditLog {
    pub fn create(
        path: impl AsRef<Path>,
        participant: Option<String>,
    ) -> Result<Self, AuditLogError> {
        let path = resolve_session_path(path.as_ref());
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| AuditLogError::Open {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), "audit log opened");
        Ok(Self {
            path,
            participant,
            file: Mutex::new(file),
        })
    }

    /// File actually written to, after collision handling
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AuditLogPort for FileAuditLog {
    fn append(&self, entry: &LogEntry) -> Result<(), AuditLogError> {
        let line = entry.format_line(self.participant.as_deref());
        let mut file = self
            .file
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        writeln!(file, "{line}")
            .and_then(|_| file.flush())
            .map_err(|source| AuditLogError::Write {
                target: self.path.display().to_string(),
                source,
            })?;

        debug!(event = %entry.event, outcome = %entry.outcome, "audit entry written");
        Ok(())
    }
}

fn resolve_session_path(requested: &Path) -> PathBuf {
    if !requested.exists() {
        return requested.to_path_buf();
    }
    let stamp = Local::now().format("%Y%m%d%H%M%S");
    let mut renamed = requested.as_os_str().to_os_string();
    renamed.push(format!("_{stamp}.txt"));
    PathBuf::from(renamed)
}
