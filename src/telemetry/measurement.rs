use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Telemetry sample
// ---------------------------------------------------------------------------

/// One decoded telemetry event from the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub step: usize,      // episode-local counter
    pub delta_t: f64,     // s since previous sample, 0 after (re)connect or reset
    pub cte: f64,         // cross-track error, signed
    pub speed: f64,       // mph
    pub angle: f64,       // reported steering angle, deg (informational)
}

impl Measurement {
    pub fn new(cte: f64, speed: f64, angle: f64, delta_t: f64) -> Self {
        Self { step: 0, delta_t, cte, speed, angle }
    }

    pub fn with_step(self, step: usize) -> Self {
        Self { step, ..self }
    }
}
