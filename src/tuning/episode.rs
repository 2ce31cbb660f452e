use serde::{Deserialize, Serialize};

use crate::control::GainVector;

/// How a tuning episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Step budget used up without leaving the track.
    Completed,
    /// `|cte|` exceeded the configured limit.
    Diverged,
}

impl Termination {
    /// Mean squared error over `steps`; a diverged episode carries `penalty`
    /// on top of its accumulated error, so shorter survival scores worse.
    ///
    /// `steps == 0` divides by 1: a divergence on the first step scores
    /// exactly `squared_error_sum + penalty`.
    pub fn score(self, squared_error_sum: f64, steps: usize, penalty: f64) -> f64 {
        let n = steps.max(1) as f64;
        match self {
            Termination::Completed => squared_error_sum / n,
            Termination::Diverged => (squared_error_sum + penalty) / n,
        }
    }
}

/// One evaluated candidate, as it stood while the episode ran.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    pub episode: usize,
    pub epoch: usize,
    pub termination: Termination,
    pub steps: usize,
    pub score: f64,
    pub gains: GainVector,
    pub increments: GainVector,
    pub best_error: Option<f64>, // best score before this episode
}

impl EpisodeRecord {
    pub fn improved(&self) -> bool {
        self.best_error.map_or(true, |best| self.score < best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_score_is_mean_squared_error() {
        assert!((Termination::Completed.score(50.0, 100, 1e6) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn earlier_divergence_scores_worse() {
        let early = Termination::Diverged.score(10.0, 10, 1e6);
        let late = Termination::Diverged.score(10.0, 500, 1e6);
        assert!((early - (10.0 + 1e6) / 10.0).abs() < 1e-9);
        assert!(early > late);
    }

    #[test]
    fn step_zero_does_not_divide_by_zero() {
        let s = Termination::Diverged.score(0.0, 0, 1e6);
        assert!(s.is_finite());
        assert_eq!(s, 1e6);
        assert_eq!(Termination::Diverged.score(0.25, 0, 1e6), 0.25 + 1e6);
        assert_eq!(Termination::Completed.score(0.25, 0, 1e6), 0.25);
    }
}
