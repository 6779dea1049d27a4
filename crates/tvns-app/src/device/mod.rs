mod controller;
mod failure_injector;

pub use controller::{CommandResult, DeviceController};
pub use failure_injector::FailureInjector;
