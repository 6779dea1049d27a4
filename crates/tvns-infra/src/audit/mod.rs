mod file;
mod memory;

pub use file::FileAuditLog;
pub use memory::MemoryAuditLog;
