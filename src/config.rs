use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::control::{GainVector, DEFAULT_DERIVATIVE_WINDOW};
use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// Which controller the search drives
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TunedAxis {
    #[default]
    Steering,
    Throttle,
}

// ---------------------------------------------------------------------------
// Tuning (Twiddle) configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TunerConfig {
    pub max_steps: usize,          // episode step budget
    pub max_cte: f64,              // |cte| beyond this ends the episode as diverged
    pub warmup_steps: usize,       // samples ignored after each (re)connect or reset
    pub initial_gains: GainVector, // search start point for the tuned axis
    pub increments: GainVector,    // initial per-gain probe sizes, all >= 0
    pub steering_gains: GainVector,
    pub throttle_gains: GainVector,
    pub target_speed: f64,         // throttle set-point, mph
    pub derivative_window: usize,
    pub divergence_penalty: f64,
    pub tuned_axis: TunedAxis,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self {
            max_steps: 1500,
            max_cte: 3.0,
            warmup_steps: 5,
            initial_gains: presets::tuning_start(),
            increments: presets::tuning_increments(),
            steering_gains: presets::steering(),
            throttle_gains: presets::throttle(),
            target_speed: presets::TARGET_SPEED,
            derivative_window: DEFAULT_DERIVATIVE_WINDOW,
            divergence_penalty: 1e6,
            tuned_axis: TunedAxis::Steering,
        }
    }
}

impl TunerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(Error::Config("max_steps must be positive".into()));
        }
        if !(self.max_cte.is_finite() && self.max_cte > 0.0) {
            return Err(Error::Config(format!("max_cte must be positive, got {}", self.max_cte)));
        }
        if !(self.increments.is_finite() && self.increments.is_non_negative()) {
            return Err(Error::Config(format!(
                "increments must be finite and non-negative, got {}",
                self.increments
            )));
        }
        for (name, g) in [
            ("initial_gains", &self.initial_gains),
            ("steering_gains", &self.steering_gains),
            ("throttle_gains", &self.throttle_gains),
        ] {
            if !g.is_finite() {
                return Err(Error::Config(format!("{} must be finite, got {}", name, g)));
            }
        }
        if !self.target_speed.is_finite() {
            return Err(Error::Config("target_speed must be finite".into()));
        }
        if self.derivative_window == 0 {
            return Err(Error::Config("derivative_window must be at least 1".into()));
        }
        if !(self.divergence_penalty.is_finite() && self.divergence_penalty >= 0.0) {
            return Err(Error::Config("divergence_penalty must be finite and non-negative".into()));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

// ---------------------------------------------------------------------------
// Tuner config builder
// ---------------------------------------------------------------------------

pub struct TunerConfigBuilder {
    config: TunerConfig,
}

impl TunerConfigBuilder {
    pub fn new() -> Self {
        Self { config: TunerConfig::default() }
    }

    pub fn max_steps(mut self, v: usize) -> Self { self.config.max_steps = v; self }
    pub fn max_cte(mut self, v: f64) -> Self { self.config.max_cte = v; self }
    pub fn warmup_steps(mut self, v: usize) -> Self { self.config.warmup_steps = v; self }
    pub fn initial_gains(mut self, v: GainVector) -> Self { self.config.initial_gains = v; self }
    pub fn increments(mut self, v: GainVector) -> Self { self.config.increments = v; self }
    pub fn steering_gains(mut self, v: GainVector) -> Self { self.config.steering_gains = v; self }
    pub fn throttle_gains(mut self, v: GainVector) -> Self { self.config.throttle_gains = v; self }
    pub fn target_speed(mut self, v: f64) -> Self { self.config.target_speed = v; self }
    pub fn derivative_window(mut self, v: usize) -> Self { self.config.derivative_window = v; self }
    pub fn divergence_penalty(mut self, v: f64) -> Self { self.config.divergence_penalty = v; self }
    pub fn tuned_axis(mut self, v: TunedAxis) -> Self { self.config.tuned_axis = v; self }

    pub fn build(self) -> Result<TunerConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for TunerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Production configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductionConfig {
    pub steering: GainVector,
    pub throttle: GainVector,
    pub target_speed: f64,
    pub derivative_window: usize,
    pub warmup_steps: usize,
}

impl Default for ProductionConfig {
    fn default() -> Self {
        Self {
            steering: presets::steering(),
            throttle: presets::throttle(),
            target_speed: presets::TARGET_SPEED,
            derivative_window: DEFAULT_DERIVATIVE_WINDOW,
            warmup_steps: 0,
        }
    }
}

impl ProductionConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.steering.is_finite() && self.throttle.is_finite()) {
            return Err(Error::Config("gains must be finite".into()));
        }
        if !self.target_speed.is_finite() {
            return Err(Error::Config("target_speed must be finite".into()));
        }
        if self.derivative_window == 0 {
            return Err(Error::Config("derivative_window must be at least 1".into()));
        }
        Ok(())
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }
}

// ---------------------------------------------------------------------------
// Preset gains
// ---------------------------------------------------------------------------

pub mod presets {
    use super::*;

    pub const TARGET_SPEED: f64 = 40.0;

    /// Steering gains found by a Twiddle run on the lake track.
    pub fn steering() -> GainVector {
        GainVector::new(0.11, 0.033, 0.11)
    }

    /// Proportional-only speed hold.
    pub fn throttle() -> GainVector {
        GainVector::new(0.8, 0.0, 0.0)
    }

    pub fn tuning_start() -> GainVector {
        GainVector::new(0.1, 0.01, 0.1)
    }

    pub fn tuning_increments() -> GainVector {
        GainVector::new(0.05, 0.005, 0.05)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(TunerConfig::default().validate().is_ok());
        assert!(ProductionConfig::default().validate().is_ok());
    }

    #[test]
    fn builder_rejects_negative_increment() {
        let res = TunerConfigBuilder::new()
            .increments(GainVector::new(0.1, -0.01, 0.1))
            .build();
        assert!(matches!(res, Err(Error::Config(_))));
    }

    #[test]
    fn builder_rejects_zero_budget() {
        assert!(TunerConfigBuilder::new().max_steps(0).build().is_err());
        assert!(TunerConfigBuilder::new().max_cte(0.0).build().is_err());
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = TunerConfig::from_json_str(
            r#"{ "max_steps": 100, "increments": [0.1, 0.0, 0.5], "tuned_axis": "throttle" }"#,
        )
        .unwrap();
        assert_eq!(config.max_steps, 100);
        assert_eq!(config.increments, GainVector::new(0.1, 0.0, 0.5));
        assert_eq!(config.tuned_axis, TunedAxis::Throttle);
        assert_eq!(config.max_cte, TunerConfig::default().max_cte);
    }

    #[test]
    fn json_validation_runs() {
        let res = TunerConfig::from_json_str(r#"{ "max_cte": -1.0 }"#);
        assert!(matches!(res, Err(Error::Config(_))));
        let res = ProductionConfig::from_json_str("not json");
        assert!(matches!(res, Err(Error::Json(_))));
    }
}
