//! Tests for the hill-climbing acceptance state machine

#[cfg(test)]
mod tests {
    use atomosaic::algorithm::climber::{Acceptance, HillClimber};

    // Tests that the first finite candidate always leaves the infinite baseline
    // Verified by initializing best energy to zero
    #[test]
    fn test_first_step_always_improves() {
        for acceptance in [Acceptance::NotWorse, Acceptance::StrictlyBetter] {
            let mut climber = HillClimber::new(acceptance);
            assert!(climber.best().is_none());
            assert!(climber.best_energy().is_infinite());

            let outcome = climber.step("a", 1.0e12);
            assert!(outcome.improved);
            assert_eq!(outcome.best, Some(&"a"));
            assert!((outcome.energy - 1.0e12).abs() < f64::EPSILON);
        }
    }

    // Tests that the best energy ends at the sequence minimum and ties go to the latest state
    // Verified by comparing with < instead of <= in NotWorse
    #[test]
    fn test_not_worse_tracks_minimum_and_latest_tie() {
        let sequence = [("a", 5.0), ("b", 3.0), ("c", 4.0), ("d", 3.0), ("e", 7.0)];
        let mut climber = HillClimber::default();

        for (state, energy) in sequence {
            climber.step(state, energy);
        }

        assert!((climber.best_energy() - 3.0).abs() < f64::EPSILON);
        assert_eq!(climber.best(), Some(&"d"));
    }

    // Tests that the strict policy keeps the earliest state achieving the minimum
    // Verified by making StrictlyBetter accept ties
    #[test]
    fn test_strictly_better_keeps_first_tie() {
        let mut climber = HillClimber::new(Acceptance::StrictlyBetter);

        assert!(climber.step("a", 2.0).improved);
        assert!(!climber.step("b", 2.0).improved);
        assert!(!climber.step("c", 9.0).improved);

        assert_eq!(climber.best(), Some(&"a"));
        assert_eq!(climber.acceptance(), Acceptance::StrictlyBetter);
    }

    // Tests that a rejected step reports the unchanged best
    // Verified by overwriting the best state before the comparison
    #[test]
    fn test_rejected_step_reports_previous_best() {
        let mut climber = HillClimber::default();
        climber.step(vec![1u8], 10.0);

        let outcome = climber.step(vec![2u8], 11.0);
        assert!(!outcome.improved);
        assert_eq!(outcome.best, Some(&vec![1u8]));
        assert!((outcome.energy - 10.0).abs() < f64::EPSILON);
    }

    // Tests that accepted energies never increase across a long sequence
    // Verified by accepting every candidate unconditionally
    #[test]
    fn test_accepted_energies_non_increasing() {
        let energies = [9.0, 12.0, 8.5, 8.5, 20.0, 1.0, 1.5, 0.0, 3.0];
        let mut climber = HillClimber::default();
        let mut accepted = Vec::new();

        for (i, energy) in energies.into_iter().enumerate() {
            let outcome = climber.step(i, energy);
            if outcome.improved {
                accepted.push(outcome.energy);
            }
        }

        assert_eq!(accepted, vec![9.0, 8.5, 8.5, 1.0, 0.0]);
        assert!(accepted.windows(2).all(|w| w[1] <= w[0]));
        assert_eq!(climber.into_best(), Some(7));
    }

    // Tests policy comparisons directly including the infinite baseline
    // Verified by swapping the two policy arms
    #[test]
    fn test_acceptance_accepts() {
        assert!(Acceptance::NotWorse.accepts(1.0, 1.0));
        assert!(!Acceptance::StrictlyBetter.accepts(1.0, 1.0));
        assert!(Acceptance::StrictlyBetter.accepts(0.5, 1.0));
        assert!(Acceptance::NotWorse.accepts(f64::INFINITY, f64::INFINITY));
        assert!(!Acceptance::StrictlyBetter.accepts(f64::INFINITY, f64::INFINITY));
        assert_eq!(Acceptance::default(), Acceptance::NotWorse);
    }
}
