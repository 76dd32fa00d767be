//! Animation clock

/// Elapsed time fed to the shader
///
/// Derived from wall-clock milliseconds at each frame. Never goes backwards:
/// if the wall clock steps back, the last reported value is repeated.
#[derive(Clone, Copy, Debug)]
pub struct AnimationClock {
    start_ms: f64,
    last_secs: f32,
}

impl AnimationClock {
    /// Start the clock at `now_ms`
    pub fn start(now_ms: f64) -> Self {
        Self {
            start_ms: now_ms,
            last_secs: 0.0,
        }
    }

    /// Seconds since start, non-decreasing across calls
    pub fn elapsed_secs(&mut self, now_ms: f64) -> f32 {
        let secs = ((now_ms - self.start_ms) * 0.001) as f32;
        if secs.is_finite() && secs > self.last_secs {
            self.last_secs = secs;
        }
        self.last_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_starts_at_zero() {
        let mut clock = AnimationClock::start(5_000.0);
        assert_eq!(clock.elapsed_secs(5_000.0), 0.0);
    }

    #[test]
    fn test_clock_scales_to_seconds() {
        let mut clock = AnimationClock::start(5_000.0);
        assert!((clock.elapsed_secs(6_500.0) - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut clock = AnimationClock::start(5_000.0);
        let a = clock.elapsed_secs(7_000.0);
        let b = clock.elapsed_secs(6_000.0);
        let c = clock.elapsed_secs(4_000.0);
        assert_eq!(a, 2.0);
        assert_eq!(b, 2.0);
        assert_eq!(c, 2.0);
    }

    #[test]
    fn test_clock_ignores_nan() {
        let mut clock = AnimationClock::start(0.0);
        clock.elapsed_secs(1_000.0);
        assert_eq!(clock.elapsed_secs(f64::NAN), 1.0);
    }
}
