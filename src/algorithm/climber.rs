//! Greedy acceptance state machine tracking the best state seen so far

/// Rule deciding whether a candidate replaces the current best
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Acceptance {
    /// Accept when the candidate energy is less than or equal to the best
    ///
    /// Ties move to the incoming candidate, letting the search drift across
    /// plateaus of equal energy.
    #[default]
    NotWorse,
    /// Accept only when the candidate energy is strictly lower
    StrictlyBetter,
}

impl Acceptance {
    /// Compare a candidate energy against the current best
    pub fn accepts(self, candidate: f64, best: f64) -> bool {
        match self {
            Self::NotWorse => candidate <= best,
            Self::StrictlyBetter => candidate < best,
        }
    }
}

/// Result of feeding one candidate to the climber
#[derive(Debug)]
pub struct StepOutcome<'a, S> {
    /// Best state after the step, `None` until something was accepted
    pub best: Option<&'a S>,
    /// Energy of the best state
    pub energy: f64,
    /// Whether the candidate became the new best
    pub improved: bool,
}

/// Hill climbing over arbitrary states
///
/// Starts with no best state and infinite energy. Any finite candidate is
/// accepted on the first step under both acceptance rules.
#[derive(Debug, Clone)]
pub struct HillClimber<S> {
    best: Option<S>,
    best_energy: f64,
    acceptance: Acceptance,
}

impl<S> Default for HillClimber<S> {
    fn default() -> Self {
        Self::new(Acceptance::default())
    }
}

impl<S> HillClimber<S> {
    /// Create a climber with no best state yet
    pub const fn new(acceptance: Acceptance) -> Self {
        Self {
            best: None,
            best_energy: f64::INFINITY,
            acceptance,
        }
    }

    /// Offer a candidate and its energy
    ///
    /// A rejected candidate is dropped without touching the recorded best.
    pub fn step(&mut self, candidate: S, energy: f64) -> StepOutcome<'_, S> {
        let improved = self.acceptance.accepts(energy, self.best_energy);
        if improved {
            self.best = Some(candidate);
            self.best_energy = energy;
        }

        StepOutcome {
            best: self.best.as_ref(),
            energy: self.best_energy,
            improved,
        }
    }

    /// Current best state
    pub const fn best(&self) -> Option<&S> {
        self.best.as_ref()
    }

    /// Energy of the current best state, infinite before the first acceptance
    pub const fn best_energy(&self) -> f64 {
        self.best_energy
    }

    /// Acceptance rule in use
    pub const fn acceptance(&self) -> Acceptance {
        self.acceptance
    }

    /// Consume the climber and return the best state
    pub fn into_best(self) -> Option<S> {
        self.best
    }
}
