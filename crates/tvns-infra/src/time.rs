use chrono::{DateTime, Local};
use tvns_core::ports::ClockPort;

pub struct SystemClock;

impl ClockPort for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock frozen at a single instant, for reproducible audit lines
pub struct FixedClock(pub DateTime<Local>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
