pub mod tracing;
pub mod wiring;
