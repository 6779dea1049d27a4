mod command;
mod state;

pub use command::{Command, CommandKind, CommandOutcome};
pub use state::{DeviceState, IllegalTransition};
