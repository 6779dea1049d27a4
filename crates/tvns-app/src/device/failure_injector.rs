use tvns_core::ports::RandomSourcePort;
use tvns_core::FailureProbability;

/// Decides, per command, whether to answer with a simulated device fault.
///
/// Knows nothing about device state. The caller consults it only for commands
/// that already passed the legality check, so illegal commands never consume
/// a draw.
pub struct FailureInjector {
    probability: FailureProbability,
    source: Box<dyn RandomSourcePort>,
}

impl FailureInjector {
    pub fn new(probability: FailureProbability, source: Box<dyn RandomSourcePort>) -> Self {
        Self {
            probability,
            source,
        }
    }

    pub fn probability(&self) -> FailureProbability {
        self.probability
    }

    /// Take one uniform draw and report whether it falls below the probability.
    pub fn should_fail(&mut self) -> bool {
        let draw = self.source.next_unit();
        self.probability.admits(draw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tvns_infra::{ScriptedRandomSource, StdRandomSource};

    #[test]
    fn zero_probability_never_fails() {
        let mut injector = FailureInjector::new(
            FailureProbability::NEVER,
            Box::new(StdRandomSource::from_seed(1)),
        );
        assert!((0..1_000).all(|_| !injector.should_fail()));
    }

    #[test]
    fn full_probability_always_fails() {
        let mut injector = FailureInjector::new(
            FailureProbability::ALWAYS,
            Box::new(StdRandomSource::from_seed(1)),
        );
        assert!((0..1_000).all(|_| injector.should_fail()));
    }

    #[test]
    fn compares_each_draw_against_probability() {
        let probability = FailureProbability::new(0.3).unwrap();
        let source = ScriptedRandomSource::new([0.1, 0.3, 0.29, 0.95], 0.5);
        let mut injector = FailureInjector::new(probability, Box::new(source));

        let decisions: Vec<bool> = (0..5).map(|_| injector.should_fail()).collect();
        assert_eq!(decisions, [true, false, true, false, false]);
    }

    #[test]
    fn seeded_injectors_agree() {
        let probability = FailureProbability::new(0.5).unwrap();
        let mut a = FailureInjector::new(probability, Box::new(StdRandomSource::from_seed(99)));
        let mut b = FailureInjector::new(probability, Box::new(StdRandomSource::from_seed(99)));

        let left: Vec<bool> = (0..64).map(|_| a.should_fail()).collect();
        let right: Vec<bool> = (0..64).map(|_| b.should_fail()).collect();
        assert_eq!(left, right);
        // A fair coin over 64 flips lands on both sides
        assert!(left.contains(&true) && left.contains(&false));
    }
}
