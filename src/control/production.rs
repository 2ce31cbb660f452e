use tracing::debug;

use crate::config::ProductionConfig;
use crate::error::Result;
use crate::telemetry::{Measurement, Responder};
use super::controller::{Controller, Outcome};
use super::pid::PidController;

// ---------------------------------------------------------------------------
// Production controller: fixed, previously tuned gains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ProductionController {
    pub steer_pid: PidController,
    pub throttle_pid: PidController,
}

impl ProductionController {
    pub fn new(config: &ProductionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: &ProductionConfig) -> Self {
        Self {
            steer_pid: PidController::with_window(config.steering, 0.0, config.derivative_window),
            throttle_pid: PidController::with_window(
                config.throttle,
                config.target_speed,
                config.derivative_window,
            ),
        }
    }

    /// Steering and throttle outputs for one measurement.
    pub fn update(&mut self, m: &Measurement) -> (f64, f64) {
        let steer_angle = self.steer_pid.update(m.cte, m.delta_t);
        let throttle = self.throttle_pid.update(m.speed, m.delta_t);
        (steer_angle, throttle)
    }
}

impl Default for ProductionController {
    fn default() -> Self {
        Self::build(&ProductionConfig::default())
    }
}

impl Controller for ProductionController {
    fn process(&mut self, m: &Measurement, responder: &mut dyn Responder) -> Outcome {
        let (steer_angle, throttle) = self.update(m);
        debug!(step = m.step, cte = m.cte, steer_angle, throttle, "control");
        responder.control(steer_angle, throttle);
        Outcome::Controlled
    }

    fn name(&self) -> &str {
        "ProductionController"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::GainVector;
    use crate::telemetry::{Command, RecordingResponder};

    #[test]
    fn one_command_per_measurement() {
        let mut ctrl = ProductionController::default();
        let mut out = RecordingResponder::new();
        for step in 0..5 {
            let m = Measurement::new(0.5, 30.0, 0.0, 0.1).with_step(step);
            assert_eq!(ctrl.process(&m, &mut out), Outcome::Controlled);
        }
        assert_eq!(out.commands.len(), 5);
        assert!(out.commands.iter().all(|c| matches!(c, Command::Control { .. })));
    }

    #[test]
    fn steers_against_cte_and_accelerates_below_target() {
        let config = ProductionConfig {
            steering: GainVector::new(0.5, 0.0, 0.0),
            throttle: GainVector::new(0.1, 0.0, 0.0),
            target_speed: 40.0,
            ..ProductionConfig::default()
        };
        let mut ctrl = ProductionController::new(&config).unwrap();
        let (steer, throttle) = ctrl.update(&Measurement::new(2.0, 30.0, 0.0, 0.0));
        assert!((steer + 1.0).abs() < 1e-12);
        assert!((throttle - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ProductionConfig { derivative_window: 0, ..ProductionConfig::default() };
        assert!(ProductionController::new(&config).is_err());
    }
}
