//! Full-viewport quad geometry

use bytemuck::{Pod, Zeroable};

/// One clip-space vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadVertex {
    pub position: [f32; 2],
}

/// Four corners of clip space in triangle-strip order
pub static QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [-1.0, -1.0] },
    QuadVertex { position: [1.0, -1.0] },
    QuadVertex { position: [-1.0, 1.0] },
    QuadVertex { position: [1.0, 1.0] },
];

/// Floats per vertex
pub const QUAD_COMPONENTS: i32 = 2;

/// Vertices per draw
pub const QUAD_VERTEX_COUNT: i32 = 4;

/// Quad as raw bytes for upload
pub fn quad_bytes() -> &'static [u8] {
    bytemuck::cast_slice(&QUAD_VERTICES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_covers_clip_space() {
        let xs: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = QUAD_VERTICES.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), -1.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 1.0);
    }

    #[test]
    fn test_quad_bytes_layout() {
        let bytes = quad_bytes();
        assert_eq!(bytes.len(), 4 * 2 * std::mem::size_of::<f32>());
        let floats: &[f32] = bytemuck::cast_slice(bytes);
        assert_eq!(floats, &[-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0]);
    }
}
