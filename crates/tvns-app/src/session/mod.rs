mod error;
mod manager;

pub use error::SessionError;
pub use manager::{CommandReport, TvnsManager};
