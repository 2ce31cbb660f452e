use tracing::{debug, info};

use crate::config::{ProductionConfig, TunerConfig};
use crate::control::{Controller, Outcome, ProductionController};
use crate::error::Result;
use crate::telemetry::{Measurement, Responder};
use crate::tuning::Twiddler;
use super::state::EpisodePhase;

// ---------------------------------------------------------------------------
// Session: warm-up aware driver around one controller
// ---------------------------------------------------------------------------

/// Owns a controller and the episode state machine in front of it.
///
/// The transport calls [`Session::process`] once per decoded measurement, in
/// arrival order. Measurements forwarded to the controller are re-stamped
/// with the episode-local step (0 for the first one after warm-up), and that
/// first one also gets `delta_t = 0` so the derivative starts clean.
#[derive(Debug, Clone)]
pub struct Session<C> {
    controller: C,
    phase: EpisodePhase,
    warmup_steps: usize,
    step: usize,
}

impl<C: Controller> Session<C> {
    pub fn new(controller: C, warmup_steps: usize) -> Self {
        Self {
            controller,
            phase: EpisodePhase::Warmup { seen: 0 },
            warmup_steps,
            step: 0,
        }
    }

    pub fn phase(&self) -> EpisodePhase {
        self.phase
    }

    /// Steps dispatched to the controller in the current episode.
    pub fn step(&self) -> usize {
        self.step
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn into_inner(self) -> C {
        self.controller
    }

    pub fn process(&mut self, m: &Measurement, responder: &mut dyn Responder) -> Outcome {
        if self.phase == EpisodePhase::ResetPending {
            debug!("reset acknowledged");
            self.begin_episode();
        }

        match self.phase {
            EpisodePhase::Converged(result) => return Outcome::Converged(result),
            EpisodePhase::Warmup { seen } if seen < self.warmup_steps => {
                self.phase = EpisodePhase::Warmup { seen: seen + 1 };
                return Outcome::WarmingUp;
            }
            EpisodePhase::Warmup { .. } => {
                debug!(controller = self.controller.name(), "warm-up done");
                self.phase = EpisodePhase::Running;
            }
            EpisodePhase::Running | EpisodePhase::ResetPending => {}
        }

        let mut stamped = m.with_step(self.step);
        if self.step == 0 {
            stamped.delta_t = 0.0;
        }
        self.step += 1;

        let outcome = self.controller.process(&stamped, responder);
        match outcome {
            Outcome::ResetRequested { .. } => self.phase = EpisodePhase::ResetPending,
            Outcome::Converged(result) => {
                info!(controller = self.controller.name(), "session finished");
                self.phase = EpisodePhase::Converged(result);
            }
            Outcome::Controlled | Outcome::WarmingUp => {}
        }
        outcome
    }

    /// The simulator confirmed a reset out of band.
    pub fn reset_acknowledged(&mut self) {
        if self.phase == EpisodePhase::ResetPending {
            self.begin_episode();
        }
    }

    /// A new simulator connection; a finished search stays finished. The
    /// interrupted episode is dropped and its candidate runs again from
    /// scratch.
    pub fn reconnect(&mut self) {
        if !self.phase.is_terminal() {
            debug!(controller = self.controller.name(), step = self.step, "reconnected");
            self.controller.restart_episode();
            self.begin_episode();
        }
    }

    /// The transport received a message it could not decode.
    pub fn no_telemetry(&self, responder: &mut dyn Responder) {
        responder.request_manual();
    }

    fn begin_episode(&mut self) {
        self.phase = EpisodePhase::Warmup { seen: 0 };
        self.step = 0;
    }
}

impl Session<Twiddler> {
    pub fn tuning(config: TunerConfig) -> Result<Self> {
        let warmup_steps = config.warmup_steps;
        Ok(Self::new(Twiddler::new(config)?, warmup_steps))
    }
}

impl Session<ProductionController> {
    pub fn production(config: &ProductionConfig) -> Result<Self> {
        Ok(Self::new(ProductionController::new(config)?, config.warmup_steps))
    }
}
