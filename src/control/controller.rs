use crate::telemetry::{Measurement, Responder};
use crate::tuning::TuningResult;

/// What happened to a measurement handed to a controller or session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    /// Discarded while the vehicle settles after a (re)connect or reset.
    WarmingUp,
    /// A control command was sent.
    Controlled,
    /// The episode ended with `score` and a reset was requested.
    ResetRequested { score: f64 },
    /// The gain search has finished; no further episodes will run.
    Converged(TuningResult),
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Converged(_))
    }
}

/// Trait for car controllers.
///
/// Implement this to plug a controller into a [`crate::session::Session`].
pub trait Controller {
    /// Handle one measurement, emitting commands through `responder`.
    fn process(&mut self, m: &Measurement, responder: &mut dyn Responder) -> Outcome;

    /// Drop any per-episode state; the next measurement starts a new episode.
    fn restart_episode(&mut self) {}

    /// Human-readable name for logging/display.
    fn name(&self) -> &str {
        "unnamed"
    }
}
