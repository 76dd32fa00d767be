//! Viewport tracking for the drawing surface

use gitaf_hal::SurfaceSize;

/// Current pixel size of the drawing surface
///
/// Mutated only by resize handling; read by every frame for the
/// resolution uniform and the GPU viewport.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    size: SurfaceSize,
}

impl Viewport {
    /// Create a viewport with the given size
    pub fn new(size: SurfaceSize) -> Self {
        Self { size }
    }

    /// Apply a new size; returns true if it changed
    pub fn resize(&mut self, size: SurfaceSize) -> bool {
        if self.size == size {
            return false;
        }
        self.size = size;
        true
    }

    #[inline]
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Resolution uniform value
    #[inline]
    pub fn resolution(&self) -> [f32; 2] {
        self.size.as_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_resize_reports_change() {
        let mut viewport = Viewport::new(SurfaceSize::new(800, 600));
        assert!(!viewport.resize(SurfaceSize::new(800, 600)));
        assert!(viewport.resize(SurfaceSize::new(1024, 768)));
        assert_eq!(viewport.resolution(), [1024.0, 768.0]);
    }
}
