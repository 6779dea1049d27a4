/// Source of uniform draws used for failure injection.
///
/// Implementations must return values in `[0, 1)`. Seedable implementations
/// make intermediate failure probabilities reproducible.
pub trait RandomSourcePort: Send {
    fn next_unit(&mut self) -> f64;
}
