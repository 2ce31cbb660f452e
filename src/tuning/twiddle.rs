use serde::{Deserialize, Serialize};

use crate::control::{GainIndex, GainVector};

// ---------------------------------------------------------------------------
// Twiddle: coordinate-ascent search over (p, i, d)
// ---------------------------------------------------------------------------

/// The search stops once the summed increments fall below this.
pub const CONVERGENCE_TOLERANCE: f64 = 0.01;

const INCREMENT_GROWTH: f64 = 1.1;
const INCREMENT_SHRINK: f64 = 0.9;

/// Next perturbation to apply to the gain under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbePhase {
    /// `+increment` from the original value.
    Raise,
    /// `-2 * increment`, landing on the opposite side of the original value.
    Lower,
    /// Back to the original value; the increment shrinks and the next gain
    /// is probed straight away.
    Revert,
}

/// Twiddle search state, advanced once per scored episode.
///
/// Knows nothing about controllers or the simulator: it is fed a score for
/// the candidate in [`TwiddleStep::current_gains`] and proposes the next one.
#[derive(Debug, Clone)]
pub struct TwiddleStep {
    gains: GainVector,
    increments: GainVector,
    best_gains: GainVector,
    best_error: Option<f64>,
    current: GainIndex,
    phase: ProbePhase,
    epoch: usize,
}

impl TwiddleStep {
    /// `increments` must be non-negative; gains with a zero increment are
    /// never probed.
    pub fn new(initial: GainVector, increments: GainVector) -> Self {
        debug_assert!(increments.is_non_negative(), "negative twiddle increment");
        let mut step = Self {
            gains: initial,
            increments,
            best_gains: initial,
            best_error: None,
            current: GainIndex::Proportional,
            phase: ProbePhase::Raise,
            epoch: 0,
        };
        if step.increments[GainIndex::Proportional] == 0.0 {
            step.current = step.next_eligible().0;
        }
        step
    }

    /// Score the candidate returned by [`Self::current_gains`] and move on to
    /// the next candidate.
    pub fn record_result(&mut self, error: f64) {
        match self.best_error {
            None => self.best_error = Some(error),
            Some(best) if error < best => {
                self.best_error = Some(error);
                self.best_gains = self.gains;
                self.increments.scale(self.current, INCREMENT_GROWTH);
                self.advance();
            }
            Some(_) => {}
        }
        self.apply_probe();
    }

    pub fn current_gains(&self) -> GainVector {
        self.gains
    }

    pub fn best_gains(&self) -> GainVector {
        self.best_gains
    }

    /// `None` until the first result has been recorded.
    pub fn best_error(&self) -> Option<f64> {
        self.best_error
    }

    pub fn increments(&self) -> GainVector {
        self.increments
    }

    pub fn current_index(&self) -> GainIndex {
        self.current
    }

    pub fn phase(&self) -> ProbePhase {
        self.phase
    }

    /// Completed passes over all three gains.
    pub fn epoch(&self) -> usize {
        self.epoch
    }

    pub fn has_converged(&self) -> bool {
        self.increments.sum() < CONVERGENCE_TOLERANCE
    }

    fn apply_probe(&mut self) {
        loop {
            let g = self.current;
            let inc = self.increments[g];
            match self.phase {
                ProbePhase::Raise => {
                    self.gains.add(g, inc);
                    self.phase = ProbePhase::Lower;
                    return;
                }
                ProbePhase::Lower => {
                    self.gains.add(g, -2.0 * inc);
                    self.phase = ProbePhase::Revert;
                    return;
                }
                ProbePhase::Revert => {
                    self.gains.add(g, inc);
                    self.increments.scale(g, INCREMENT_SHRINK);
                    self.advance();
                }
            }
        }
    }

    fn advance(&mut self) {
        let (next, wrapped) = self.next_eligible();
        self.current = next;
        self.phase = ProbePhase::Raise;
        if wrapped {
            self.epoch += 1;
        }
    }

    /// Next gain with a non-zero increment. Stays put when every increment
    /// is zero.
    fn next_eligible(&self) -> (GainIndex, bool) {
        let mut idx = self.current;
        let mut wrapped = false;
        for _ in 0..GainIndex::ALL.len() {
            let (next, w) = idx.next();
            idx = next;
            wrapped |= w;
            if self.increments[idx] != 0.0 {
                return (idx, wrapped);
            }
        }
        (self.current, false)
    }
}
