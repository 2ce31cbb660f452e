use crate::tuning::TuningResult;

// ---------------------------------------------------------------------------
// Episode lifecycle
// ---------------------------------------------------------------------------

/// Where a session is in the episode cycle.
///
/// `Warmup -> Running -> ResetPending -> Warmup -> ...`, with `Converged`
/// reachable only from `Running` once a gain search has finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EpisodePhase {
    /// Samples are discarded while the simulator settles.
    Warmup { seen: usize },
    Running,
    /// Reset sent; the next sample acknowledges it.
    ResetPending,
    Converged(TuningResult),
}

impl EpisodePhase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EpisodePhase::Converged(_))
    }
}
