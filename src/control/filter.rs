// ---------------------------------------------------------------------------
// Moving-average low-pass filter (derivative smoothing)
// ---------------------------------------------------------------------------

/// Fixed-window moving average over a circular buffer.
///
/// Unwritten slots start at zero and count towards the mean, so the output
/// ramps up over the first `window` samples.
#[derive(Debug, Clone)]
pub struct LowPassFilter {
    buffer: Vec<f64>,
    cursor: usize,
}

impl LowPassFilter {
    /// A window of 0 is treated as 1 (no smoothing).
    pub fn new(window: usize) -> Self {
        Self {
            buffer: vec![0.0; window.max(1)],
            cursor: 0,
        }
    }

    pub fn window(&self) -> usize {
        self.buffer.len()
    }

    pub fn update(&mut self, value: f64) -> f64 {
        self.buffer[self.cursor] = value;
        self.cursor = (self.cursor + 1) % self.buffer.len();
        self.buffer.iter().sum::<f64>() / self.buffer.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_dilute_until_full() {
        let mut f = LowPassFilter::new(3);
        let out: Vec<f64> = [1.0, 2.0, 3.0, 4.0].iter().map(|v| f.update(*v)).collect();
        let expected = [1.0 / 3.0, 1.0, 2.0, 3.0];
        for (o, e) in out.iter().zip(expected.iter()) {
            assert!((o - e).abs() < 1e-12, "got {}, expected {}", o, e);
        }
    }

    #[test]
    fn window_one_is_pass_through() {
        let mut f = LowPassFilter::new(1);
        assert_eq!(f.update(5.0), 5.0);
        assert_eq!(f.update(-2.5), -2.5);
    }

    #[test]
    fn window_never_changes() {
        let mut f = LowPassFilter::new(4);
        for i in 0..25 {
            f.update(i as f64);
        }
        assert_eq!(f.window(), 4);
        assert_eq!(LowPassFilter::new(0).window(), 1);
    }
}
