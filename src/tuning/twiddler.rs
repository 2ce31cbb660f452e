use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{TunedAxis, TunerConfig};
use crate::control::{Controller, GainVector, Outcome, PidController};
use crate::error::Result;
use crate::telemetry::{Measurement, Responder};
use super::episode::{EpisodeRecord, Termination};
use super::twiddle::TwiddleStep;

/// Final answer of a converged search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TuningResult {
    pub best_gains: GainVector,
    pub best_error: f64,
    pub epochs: usize,
    pub episodes: usize,
}

// ---------------------------------------------------------------------------
// Twiddler: runs scored episodes and feeds the search
// ---------------------------------------------------------------------------

/// Episode orchestrator for Twiddle tuning.
///
/// Drives a steering and a throttle controller, one of which carries the
/// candidate gains. An episode ends when the step budget is used up or the
/// car leaves the track; the score goes to [`TwiddleStep`], the controllers
/// are rebuilt around the next candidate and a reset is requested.
#[derive(Debug, Clone)]
pub struct Twiddler {
    config: TunerConfig,
    steer_pid: PidController,
    throttle_pid: PidController,
    twiddle: TwiddleStep,
    history: Vec<EpisodeRecord>,
    result: Option<TuningResult>,
}

impl Twiddler {
    pub fn new(config: TunerConfig) -> Result<Self> {
        config.validate()?;
        let twiddle = TwiddleStep::new(config.initial_gains, config.increments);
        let (steer_pid, throttle_pid) = build_controllers(&config, twiddle.current_gains());
        info!(
            axis = ?config.tuned_axis,
            gains = %twiddle.current_gains(),
            increments = %twiddle.increments(),
            max_steps = config.max_steps,
            max_cte = config.max_cte,
            "twiddle search started"
        );
        Ok(Self {
            config,
            steer_pid,
            throttle_pid,
            twiddle,
            history: Vec::new(),
            result: None,
        })
    }

    pub fn config(&self) -> &TunerConfig {
        &self.config
    }

    pub fn search(&self) -> &TwiddleStep {
        &self.twiddle
    }

    pub fn history(&self) -> &[EpisodeRecord] {
        &self.history
    }

    /// `Some` once the search has converged.
    pub fn result(&self) -> Option<TuningResult> {
        self.result
    }

    pub fn steer_pid(&self) -> &PidController {
        &self.steer_pid
    }

    pub fn throttle_pid(&self) -> &PidController {
        &self.throttle_pid
    }

    fn tuned_squared_error(&self) -> f64 {
        match self.config.tuned_axis {
            TunedAxis::Steering => self.steer_pid.squared_error_total(),
            TunedAxis::Throttle => self.throttle_pid.squared_error_total(),
        }
    }

    fn control(&mut self, m: &Measurement, responder: &mut dyn Responder) -> Outcome {
        let steer_angle = self.steer_pid.update(m.cte, m.delta_t);
        let throttle = self.throttle_pid.update(m.speed, m.delta_t);
        debug!(step = m.step, cte = m.cte, steer_angle, throttle, "control");
        responder.control(steer_angle, throttle);
        Outcome::Controlled
    }

    fn finish_episode(
        &mut self,
        termination: Termination,
        steps: usize,
        responder: &mut dyn Responder,
    ) -> Outcome {
        let score = termination.score(
            self.tuned_squared_error(),
            steps,
            self.config.divergence_penalty,
        );
        let record = EpisodeRecord {
            episode: self.history.len(),
            epoch: self.twiddle.epoch(),
            termination,
            steps,
            score,
            gains: self.twiddle.current_gains(),
            increments: self.twiddle.increments(),
            best_error: self.twiddle.best_error(),
        };
        info!(
            episode = record.episode,
            epoch = record.epoch,
            ?termination,
            steps,
            score,
            gains = %record.gains,
            increments = %record.increments,
            best_gains = %self.twiddle.best_gains(),
            best_error = ?record.best_error,
            "episode finished"
        );
        self.history.push(record);

        self.twiddle.record_result(score);

        if self.twiddle.has_converged() {
            let result = TuningResult {
                best_gains: self.twiddle.best_gains(),
                best_error: self.twiddle.best_error().unwrap_or(score),
                epochs: self.twiddle.epoch(),
                episodes: self.history.len(),
            };
            info!(
                best_gains = %result.best_gains,
                best_error = result.best_error,
                episodes = result.episodes,
                "twiddle search converged"
            );
            self.result = Some(result);
            return Outcome::Converged(result);
        }

        info!(next = %self.twiddle.current_gains(), "next candidate");
        let (steer_pid, throttle_pid) = build_controllers(&self.config, self.twiddle.current_gains());
        self.steer_pid = steer_pid;
        self.throttle_pid = throttle_pid;
        responder.request_reset();
        Outcome::ResetRequested { score }
    }
}

impl Controller for Twiddler {
    fn process(&mut self, m: &Measurement, responder: &mut dyn Responder) -> Outcome {
        if let Some(result) = self.result {
            return Outcome::Converged(result);
        }

        if m.step < self.config.max_steps {
            if m.cte.abs() > self.config.max_cte {
                warn!(step = m.step, cte = m.cte, max_cte = self.config.max_cte, "car left the track");
                self.finish_episode(Termination::Diverged, m.step, responder)
            } else {
                self.control(m, responder)
            }
        } else {
            self.finish_episode(Termination::Completed, m.step, responder)
        }
    }

    /// Abandons the running episode unscored and restarts the same candidate.
    fn restart_episode(&mut self) {
        if self.result.is_some() {
            return;
        }
        debug!(gains = %self.twiddle.current_gains(), "episode restarted");
        let (steer_pid, throttle_pid) = build_controllers(&self.config, self.twiddle.current_gains());
        self.steer_pid = steer_pid;
        self.throttle_pid = throttle_pid;
    }

    fn name(&self) -> &str {
        "Twiddler"
    }
}

/// Fresh steering and throttle controllers with `candidate` on the tuned axis.
fn build_controllers(config: &TunerConfig, candidate: GainVector) -> (PidController, PidController) {
    let (steering, throttle) = match config.tuned_axis {
        TunedAxis::Steering => (candidate, config.throttle_gains),
        TunedAxis::Throttle => (config.steering_gains, candidate),
    };
    (
        PidController::with_window(steering, 0.0, config.derivative_window),
        PidController::with_window(throttle, config.target_speed, config.derivative_window),
    )
}
