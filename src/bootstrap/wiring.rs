//! Assembly of the simulated device shared by the mock server and `--offline` sessions

use std::sync::Arc;

use tvns_app::{DeviceController, FailureInjector};
use tvns_core::FailureProbability;
use tvns_infra::{StdRandomSource, SystemClock};

/// Build a disconnected device.
///
/// With a `seed` the failure draws repeat exactly across runs; without one
/// they come from OS entropy.
pub fn build_device_controller(
    probability: FailureProbability,
    seed: Option<u64>,
) -> Arc<DeviceController> {
    let injector = FailureInjector::new(probability, Box::new(StdRandomSource::new(seed)));
    Arc::new(DeviceController::new(injector, Arc::new(SystemClock)))
}
