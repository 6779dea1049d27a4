use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tvns_core::ports::{AuditLogError, AuditLogPort};
use tvns_core::LogEntry;

/// In-memory audit log.
///
/// Used by tests and dry runs. `set_unavailable(true)` makes every append fail
/// the way an unwritable file would.
#[derive(Default)]
pub struct MemoryAuditLog {
    entries: Mutex<Vec<LogEntry>>,
    unavailable: AtomicBool,
}

impl MemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AuditLogPort for MemoryAuditLog {
    fn append(&self, entry: &LogEntry) -> Result<(), AuditLogError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuditLogError::Write {
                target: "memory".to_string(),
                source: io::Error::new(io::ErrorKind::Other, "audit sink unavailable"),
            });
        }
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(entry.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use tvns_core::AuditOutcome;

    #[test]
    fn keeps_entries_in_append_order() {
        let log = MemoryAuditLog::new();
        for event in ["initialise", "startTreatment", "stopTreatment"] {
            log.append(&LogEntry::new(Local::now(), event, AuditOutcome::Success))
                .unwrap();
        }

        let events: Vec<String> = log.entries().into_iter().map(|e| e.event).collect();
        assert_eq!(events, ["initialise", "startTreatment", "stopTreatment"]);
    }

    #[test]
    fn unavailable_sink_rejects_appends() {
        let log = MemoryAuditLog::new();
        log.set_unavailable(true);

        let result = log.append(&LogEntry::new(Local::now(), "initialise", AuditOutcome::Success));

        assert!(matches!(result, Err(AuditLogError::Write { .. })));
        assert!(log.is_empty());
    }
}
