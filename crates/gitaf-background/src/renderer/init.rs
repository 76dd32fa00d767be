use std::borrow::Cow;

use gitaf_hal::{GraphicsContext, Host, ShaderStage};

use crate::config::RendererConfig;
use crate::error::RenderError;
use crate::geometry::quad_bytes;
use crate::shaders::{
    ATTRIBUTE_POSITION, SHADER_STARFIELD, SHADER_VERTEX, UNIFORM_RESOLUTION, UNIFORM_TIME,
};

/// GPU objects created once per mount
///
/// Never released explicitly: the host reclaims them with the surface.
pub(crate) struct GpuResources<G: GraphicsContext> {
    pub gl: G,
    pub program: G::Program,
    pub quad: G::Buffer,
    pub u_time: Option<G::Uniform>,
    pub u_resolution: Option<G::Uniform>,
    pub position: u32,
}

/// Source text for both stages
pub(crate) struct ShaderSources {
    pub vertex: Cow<'static, str>,
    pub fragment: Cow<'static, str>,
}

impl ShaderSources {
    /// Read document-provided stages, falling back to the built-in ones
    pub fn resolve<H: Host>(host: &H, config: &RendererConfig) -> Self {
        Self {
            vertex: read_block(host, config.vertex_shader_id.as_deref(), SHADER_VERTEX),
            fragment: read_block(host, config.fragment_shader_id.as_deref(), SHADER_STARFIELD),
        }
    }
}

fn read_block<H: Host>(host: &H, id: Option<&str>, builtin: &'static str) -> Cow<'static, str> {
    id.and_then(|id| host.shader_source(id))
        .filter(|text| !text.trim().is_empty())
        .map(Cow::Owned)
        .unwrap_or(Cow::Borrowed(builtin))
}

/// Compile both stages and link them into one program
///
/// Both stages are compiled before either result is checked.
pub(crate) fn create_program<G: GraphicsContext>(
    gl: &G,
    sources: &ShaderSources,
) -> Result<G::Program, RenderError> {
    let vertex = gl
        .compile_shader(ShaderStage::Vertex, &sources.vertex)
        .map_err(|e| RenderError::compile(ShaderStage::Vertex, e));
    let fragment = gl
        .compile_shader(ShaderStage::Fragment, &sources.fragment)
        .map_err(|e| RenderError::compile(ShaderStage::Fragment, e));

    let (vertex, fragment) = (vertex?, fragment?);
    gl.link_program(&vertex, &fragment).map_err(RenderError::link)
}

/// Build every GPU object the frame loop needs
pub(crate) fn create_resources<G: GraphicsContext>(
    gl: G,
    sources: &ShaderSources,
) -> Result<GpuResources<G>, RenderError> {
    let program = create_program(&gl, sources)?;

    let u_time = gl.uniform_location(&program, UNIFORM_TIME);
    let u_resolution = gl.uniform_location(&program, UNIFORM_RESOLUTION);
    let position = gl
        .attribute_location(&program, ATTRIBUTE_POSITION)
        .ok_or(RenderError::VertexInputMissing(ATTRIBUTE_POSITION))?;

    let quad = gl
        .create_vertex_buffer(quad_bytes())
        .map_err(RenderError::BufferUploadFailed)?;

    Ok(GpuResources {
        gl,
        program,
        quad,
        u_time,
        u_resolution,
        position,
    })
}
