//! WebGL 1 implementation of the graphics interface

use std::cell::Cell;

use gitaf_hal::{GfxError, GraphicsContext, ShaderStage, SurfaceSize};
use web_sys::{
    WebGlBuffer, WebGlProgram, WebGlRenderingContext as GL, WebGlShader, WebGlUniformLocation,
};

/// `check_errors` calls per `getError` poll
///
/// `getError` stalls the GPU pipeline, so it is sampled; context loss is
/// still checked on every call.
const ERROR_POLL_INTERVAL: u32 = 60;

/// Decides which `check_errors` calls poll `getError`: the first, then
/// every `ERROR_POLL_INTERVAL`th
#[derive(Debug, Default)]
struct ErrorPoll {
    calls: Cell<u32>,
}

impl ErrorPoll {
    fn due(&self) -> bool {
        let n = self.calls.get();
        self.calls.set((n + 1) % ERROR_POLL_INTERVAL);
        n == 0
    }
}

/// Graphics context backed by a canvas `webgl` context
pub struct WebGl {
    gl: GL,
    error_poll: ErrorPoll,
}

impl WebGl {
    pub fn new(gl: GL) -> Self {
        Self {
            gl,
            error_poll: ErrorPoll::default(),
        }
    }
}

impl GraphicsContext for WebGl {
    type Shader = WebGlShader;
    type Program = WebGlProgram;
    type Buffer = WebGlBuffer;
    type Uniform = WebGlUniformLocation;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<WebGlShader, GfxError> {
        let kind = match stage {
            ShaderStage::Vertex => GL::VERTEX_SHADER,
            ShaderStage::Fragment => GL::FRAGMENT_SHADER,
        };
        let shader = self
            .gl
            .create_shader(kind)
            .ok_or(GfxError::ResourceCreation("shader"))?;
        self.gl.shader_source(&shader, source);
        self.gl.compile_shader(&shader);

        let compiled = self
            .gl
            .get_shader_parameter(&shader, GL::COMPILE_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !compiled {
            let log = self.gl.get_shader_info_log(&shader).unwrap_or_default();
            self.gl.delete_shader(Some(&shader));
            return Err(GfxError::CompileFailed(log));
        }
        Ok(shader)
    }

    fn link_program(
        &self,
        vertex: &WebGlShader,
        fragment: &WebGlShader,
    ) -> Result<WebGlProgram, GfxError> {
        let program = self
            .gl
            .create_program()
            .ok_or(GfxError::ResourceCreation("program"))?;
        self.gl.attach_shader(&program, vertex);
        self.gl.attach_shader(&program, fragment);
        self.gl.link_program(&program);

        let linked = self
            .gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = self.gl.get_program_info_log(&program).unwrap_or_default();
            self.gl.delete_program(Some(&program));
            return Err(GfxError::LinkFailed(log));
        }
        Ok(program)
    }

    fn uniform_location(&self, program: &WebGlProgram, name: &str) -> Option<WebGlUniformLocation> {
        self.gl.get_uniform_location(program, name)
    }

    fn attribute_location(&self, program: &WebGlProgram, name: &str) -> Option<u32> {
        // -1 when the program has no such input
        u32::try_from(self.gl.get_attrib_location(program, name)).ok()
    }

    fn create_vertex_buffer(&self, bytes: &[u8]) -> Result<WebGlBuffer, GfxError> {
        let buffer = self
            .gl
            .create_buffer()
            .ok_or(GfxError::ResourceCreation("buffer"))?;
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
        self.gl
            .buffer_data_with_u8_array(GL::ARRAY_BUFFER, bytes, GL::STATIC_DRAW);
        Ok(buffer)
    }

    fn set_viewport(&self, size: SurfaceSize) {
        self.gl.viewport(0, 0, size.width as i32, size.height as i32);
    }

    fn clear(&self, rgba: [f32; 4]) {
        self.gl.clear_color(rgba[0], rgba[1], rgba[2], rgba[3]);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
    }

    fn use_program(&self, program: &WebGlProgram) {
        self.gl.use_program(Some(program));
    }

    fn set_uniform_f32(&self, location: Option<&WebGlUniformLocation>, value: f32) {
        self.gl.uniform1f(location, value);
    }

    fn set_uniform_vec2(&self, location: Option<&WebGlUniformLocation>, value: [f32; 2]) {
        self.gl.uniform2f(location, value[0], value[1]);
    }

    fn bind_vertex_buffer(&self, buffer: &WebGlBuffer, slot: u32, components: i32) {
        self.gl.enable_vertex_attrib_array(slot);
        self.gl.bind_buffer(GL::ARRAY_BUFFER, Some(buffer));
        self.gl
            .vertex_attrib_pointer_with_i32(slot, components, GL::FLOAT, false, 0, 0);
    }

    fn draw_triangle_strip(&self, count: i32) {
        self.gl.draw_arrays(GL::TRIANGLE_STRIP, 0, count);
    }

    fn check_errors(&self) -> Result<(), GfxError> {
        if self.gl.is_context_lost() {
            return Err(GfxError::ContextLost);
        }
        if !self.error_poll.due() {
            return Ok(());
        }
        match self.gl.get_error() {
            GL::NO_ERROR => Ok(()),
            code => Err(GfxError::Api(code)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_poll_first_call_is_due() {
        assert!(ErrorPoll::default().due());
    }

    #[test]
    fn test_error_poll_interval() {
        let poll = ErrorPoll::default();
        let due: Vec<u32> = (0..ERROR_POLL_INTERVAL * 3)
            .filter(|_| poll.due())
            .collect();
        assert_eq!(due, vec![0, ERROR_POLL_INTERVAL, ERROR_POLL_INTERVAL * 2]);
    }
}
