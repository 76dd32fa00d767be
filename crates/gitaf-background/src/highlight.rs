//! Pointer highlight for call-to-action elements
//!
//! Purely cosmetic: the element's CSS reads `--x` / `--y` to place a
//! radial glow under the cursor. Nothing here affects the shader.

use gitaf_hal::ElementBounds;

/// CSS default used when an element has no measurable area
pub const HIGHLIGHT_CENTER: f64 = 50.0;

/// Cursor position inside an element, in percent of its size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HighlightPosition {
    pub x: f64,
    pub y: f64,
}

impl HighlightPosition {
    /// Normalize a client-space pointer position against element bounds
    ///
    /// Both axes are clamped to `[0, 100]`.
    pub fn from_pointer(client_x: f64, client_y: f64, bounds: ElementBounds) -> Self {
        Self {
            x: normalize(client_x - bounds.left, bounds.width),
            y: normalize(client_y - bounds.top, bounds.height),
        }
    }
}

fn normalize(offset: f64, extent: f64) -> f64 {
    if extent.is_nan() || extent <= 0.0 || !offset.is_finite() {
        return HIGHLIGHT_CENTER;
    }
    (offset / extent * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> ElementBounds {
        ElementBounds::new(100.0, 200.0, 160.0, 50.0)
    }

    #[test]
    fn test_highlight_proportional() {
        let pos = HighlightPosition::from_pointer(140.0, 225.0, button());
        assert!((pos.x - 25.0).abs() < 1e-9);
        assert!((pos.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_highlight_corners() {
        let top_left = HighlightPosition::from_pointer(100.0, 200.0, button());
        assert_eq!((top_left.x, top_left.y), (0.0, 0.0));
        let bottom_right = HighlightPosition::from_pointer(260.0, 250.0, button());
        assert_eq!((bottom_right.x, bottom_right.y), (100.0, 100.0));
    }

    #[test]
    fn test_highlight_clamped_outside_bounds() {
        let pos = HighlightPosition::from_pointer(50.0, 400.0, button());
        assert_eq!((pos.x, pos.y), (0.0, 100.0));
    }

    #[test]
    fn test_highlight_degenerate_bounds() {
        let pos = HighlightPosition::from_pointer(10.0, 10.0, ElementBounds::new(0.0, 0.0, 0.0, -5.0));
        assert_eq!((pos.x, pos.y), (HIGHLIGHT_CENTER, HIGHLIGHT_CENTER));
    }
}
