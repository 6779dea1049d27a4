use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
#[error("failure probability must be within [0.0, 1.0], got {0}")]
pub struct InvalidProbability(pub f64);

/// Probability that an otherwise legal command is answered with a simulated fault.
///
/// Validated once at construction; the value never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct FailureProbability(f64);

impl FailureProbability {
    pub const NEVER: Self = Self(0.0);
    pub const ALWAYS: Self = Self(1.0);

    pub fn new(value: f64) -> Result<Self, InvalidProbability> {
        // NaN fails both comparisons
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidProbability(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Decide a uniform draw in `[0, 1)`: fail when `draw < probability`.
    pub fn admits(self, draw: f64) -> bool {
        draw < self.0
    }
}

impl Default for FailureProbability {
    fn default() -> Self {
        Self::NEVER
    }
}

impl TryFrom<f64> for FailureProbability {
    type Error = InvalidProbability;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FailureProbability> for f64 {
    fn from(probability: FailureProbability) -> Self {
        probability.0
    }
}

impl fmt::Display for FailureProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_closed_unit_interval() {
        assert_eq!(FailureProbability::new(0.0), Ok(FailureProbability::NEVER));
        assert_eq!(FailureProbability::new(1.0), Ok(FailureProbability::ALWAYS));
        assert_eq!(FailureProbability::new(0.2).map(|p| p.value()), Ok(0.2));
    }

    #[test]
    fn rejects_out_of_range_and_nan() {
        assert!(FailureProbability::new(-0.01).is_err());
        assert!(FailureProbability::new(1.01).is_err());
        assert!(FailureProbability::new(f64::NAN).is_err());
        assert!(FailureProbability::new(f64::INFINITY).is_err());
    }

    #[test]
    fn zero_never_admits_and_one_always_admits() {
        for draw in [0.0, 0.25, 0.5, 0.999_999] {
            assert!(!FailureProbability::NEVER.admits(draw));
            assert!(FailureProbability::ALWAYS.admits(draw));
        }
    }

    #[test]
    fn draw_equal_to_probability_does_not_fail() {
        let p = FailureProbability::new(0.5).unwrap();
        assert!(p.admits(0.49));
        assert!(!p.admits(0.5));
    }

    #[test]
    fn deserialization_validates_range() {
        let p: FailureProbability = serde_json::from_str("0.25").unwrap();
        assert_eq!(p.value(), 0.25);
        assert!(serde_json::from_str::<FailureProbability>("1.5").is_err());
    }

    #[test]
    fn displays_as_percentage() {
        assert_eq!(FailureProbability::new(0.2).unwrap().to_string(), "20%");
    }
}
