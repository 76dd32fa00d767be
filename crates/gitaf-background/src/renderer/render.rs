use gitaf_hal::{GraphicsContext, SurfaceSize};

use super::init::GpuResources;
use crate::error::RenderError;
use crate::geometry::{QUAD_COMPONENTS, QUAD_VERTEX_COUNT};
use crate::uniforms::Uniforms;

/// Opaque black
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Draw one frame: clear, bind, push uniforms, one 4-vertex strip
pub(crate) fn draw_frame<G: GraphicsContext>(
    res: &GpuResources<G>,
    viewport: SurfaceSize,
    uniforms: &Uniforms,
) -> Result<(), RenderError> {
    let gl = &res.gl;

    gl.set_viewport(viewport);
    gl.clear(CLEAR_COLOR);
    gl.use_program(&res.program);

    gl.set_uniform_f32(res.u_time.as_ref(), uniforms.time);
    gl.set_uniform_vec2(res.u_resolution.as_ref(), uniforms.resolution);

    gl.bind_vertex_buffer(&res.quad, res.position, QUAD_COMPONENTS);
    gl.draw_triangle_strip(QUAD_VERTEX_COUNT);

    gl.check_errors().map_err(RenderError::FrameRenderFailed)
}
