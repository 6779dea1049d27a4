pub mod audit;
pub mod random;
pub mod time;
pub mod transport;

pub use audit::{FileAuditLog, MemoryAuditLog};
pub use random::{ScriptedRandomSource, StdRandomSource};
pub use time::{FixedClock, SystemClock};
pub use transport::HttpCommandTransport;
