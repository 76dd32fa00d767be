//! Per-frame shader inputs

use crate::clock::AnimationClock;
use crate::viewport::Viewport;

/// Values pushed to the fragment stage each frame
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Uniforms {
    /// Seconds since rendering began
    pub time: f32,
    /// Surface size in pixels
    pub resolution: [f32; 2],
}

impl Uniforms {
    /// Sample the clock and viewport for one frame
    pub fn for_frame(clock: &mut AnimationClock, viewport: &Viewport, now_ms: f64) -> Self {
        Self {
            time: clock.elapsed_secs(now_ms),
            resolution: viewport.resolution(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gitaf_hal::SurfaceSize;

    #[test]
    fn test_uniforms_for_frame() {
        let mut clock = AnimationClock::start(1_000.0);
        let viewport = Viewport::new(SurfaceSize::new(1280, 720));
        let uniforms = Uniforms::for_frame(&mut clock, &viewport, 3_000.0);
        assert_eq!(uniforms.time, 2.0);
        assert_eq!(uniforms.resolution, [1280.0, 720.0]);
    }
}
