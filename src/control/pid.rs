use super::filter::LowPassFilter;
use super::gains::GainVector;

// ---------------------------------------------------------------------------
// PID Controller (single axis)
// ---------------------------------------------------------------------------

/// Derivative smoothing window used by the tuned controllers.
pub const DEFAULT_DERIVATIVE_WINDOW: usize = 10;

/// Single-axis PID controller with a smoothed derivative term.
///
/// Also accumulates the squared error it has seen, which is the score a
/// tuning episode is judged by. Gains are fixed for the controller's
/// lifetime; build a new one to change them.
#[derive(Debug, Clone)]
pub struct PidController {
    gains: GainVector,
    set_point: f64,
    integral_error: f64,
    previous_error: f64,
    squared_error_sum: f64,
    derivative_filter: LowPassFilter,
}

impl PidController {
    pub fn new(gains: GainVector, set_point: f64) -> Self {
        Self::with_window(gains, set_point, DEFAULT_DERIVATIVE_WINDOW)
    }

    /// `window == 1` disables derivative smoothing.
    pub fn with_window(gains: GainVector, set_point: f64, window: usize) -> Self {
        Self {
            gains,
            set_point,
            integral_error: 0.0,
            previous_error: 0.0,
            squared_error_sum: 0.0,
            derivative_filter: LowPassFilter::new(window),
        }
    }

    pub fn update(&mut self, measured_value: f64, delta_t: f64) -> f64 {
        let error = self.set_point - measured_value;
        // First sample of an episode arrives with delta_t == 0
        let raw_derivative = if delta_t != 0.0 {
            (error - self.previous_error) / delta_t
        } else {
            0.0
        };
        let derivative = self.derivative_filter.update(raw_derivative);

        self.integral_error += error * delta_t;
        self.squared_error_sum += error * error;
        self.previous_error = error;

        self.gains.p() * error + self.gains.i() * self.integral_error + self.gains.d() * derivative
    }

    pub fn squared_error_total(&self) -> f64 {
        self.squared_error_sum
    }

    pub fn integral_error(&self) -> f64 {
        self.integral_error
    }

    pub fn previous_error(&self) -> f64 {
        self.previous_error
    }

    pub fn gains(&self) -> GainVector {
        self.gains
    }

    pub fn set_point(&self) -> f64 {
        self.set_point
    }

    pub fn derivative_window(&self) -> usize {
        self.derivative_filter.window()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pid_proportional() {
        let mut pid = PidController::new(GainVector::new(1.0, 0.0, 0.0), 0.0);
        let out = pid.update(3.0, 0.1);
        assert!((out + 3.0).abs() < 1e-12, "Pure P should output -Kp * measured");
    }

    #[test]
    fn pid_integral_accumulates_linearly() {
        let mut pid = PidController::new(GainVector::new(0.0, 1.0, 0.0), 2.0);
        for k in 1..=5 {
            pid.update(0.0, 0.1);
            assert!(
                (pid.integral_error() - k as f64 * 2.0 * 0.1).abs() < 1e-12,
                "integral after {} steps: {}",
                k,
                pid.integral_error()
            );
        }
    }

    #[test]
    fn zero_delta_t_zeroes_derivative() {
        let mut pid = PidController::with_window(GainVector::new(0.0, 0.0, 1.0), 0.0, 1);
        assert_eq!(pid.update(5.0, 0.0), 0.0);
        assert_eq!(pid.update(-40.0, 0.0), 0.0);
    }

    #[test]
    fn unsmoothed_derivative() {
        let mut pid = PidController::with_window(GainVector::new(0.0, 0.0, 1.0), 0.0, 1);
        pid.update(1.0, 0.0);
        // error goes from -1 to -3 over 0.5 s
        let out = pid.update(3.0, 0.5);
        assert!((out + 4.0).abs() < 1e-12);
    }

    #[test]
    fn smoothed_derivative_is_diluted() {
        let mut pid = PidController::with_window(GainVector::new(0.0, 0.0, 1.0), 0.0, 4);
        pid.update(0.0, 0.0);
        let out = pid.update(-2.0, 1.0);
        // raw derivative 2.0 spread over a 4-slot window
        assert!((out - 0.5).abs() < 1e-12);
    }

    #[test]
    fn squared_error_sum_tracks_all_samples() {
        let mut pid = PidController::new(GainVector::new(0.2, 0.0, 0.0), 0.0);
        for cte in [1.0, -2.0, 3.0] {
            pid.update(cte, 0.05);
        }
        assert!((pid.squared_error_total() - 14.0).abs() < 1e-12);
        assert!((pid.previous_error() + 3.0).abs() < 1e-12);
    }
}
