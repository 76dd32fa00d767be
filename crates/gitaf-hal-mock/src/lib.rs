//! Mock host for testing the GITAF background renderer
//!
//! This provides recording implementations of the host traits so the
//! renderer's lifecycle can be unit tested without a browser or a GPU.
//!
//! Both [`MockHost`] and [`MockGl`] are cheap handles over shared state:
//! clone one before handing it to the renderer and keep the clone to
//! inspect what happened or to inject failures.

#![no_std]
extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use gitaf_hal::{
    FrameRequest, GfxError, GraphicsContext, HalError, Host, PlatformCapabilities, ShaderStage,
    SurfaceSize,
};

/// Desktop browser user agent used by default
pub const DESKTOP_SIGNAL: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// iPhone user agent
pub const IPHONE_SIGNAL: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

/// Android user agent
pub const ANDROID_SIGNAL: &str =
    "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 Chrome/120.0 Mobile Safari/537.36";

// =============================================================================
// MockHost
// =============================================================================

/// Recording host
#[derive(Clone)]
pub struct MockHost {
    state: Rc<HostState>,
}

struct HostState {
    signal: RefCell<String>,
    gl: MockGl,
    context_available: Cell<bool>,
    context_requests: Cell<usize>,
    surface_hidden: Cell<bool>,
    fallback_shown: Cell<bool>,
    viewport: Cell<SurfaceSize>,
    surface: Cell<SurfaceSize>,
    surface_resizes: Cell<usize>,
    shader_blocks: RefCell<BTreeMap<String, String>>,
    time_ms: Cell<f64>,
    next_frame_id: Cell<i32>,
    pending_frames: RefCell<Vec<FrameRequest>>,
    cancelled_frames: RefCell<Vec<FrameRequest>>,
    frame_requests: Cell<usize>,
    scheduler_fails: Cell<bool>,
    resize_listening: Cell<bool>,
    resize_listen_fails: Cell<bool>,
    pointer_elements: Cell<usize>,
    pointer_listening: Cell<bool>,
    highlights: RefCell<BTreeMap<usize, (f64, f64)>>,
    debug_log: RefCell<Vec<String>>,
}

impl MockHost {
    /// Create a desktop host with a working context and a 1920x1080 viewport
    pub fn new() -> Self {
        Self::with_signal(DESKTOP_SIGNAL)
    }

    /// Create a host reporting the given device signal
    pub fn with_signal(signal: &str) -> Self {
        Self {
            state: Rc::new(HostState {
                signal: RefCell::new(signal.to_string()),
                gl: MockGl::new(),
                context_available: Cell::new(true),
                context_requests: Cell::new(0),
                surface_hidden: Cell::new(false),
                fallback_shown: Cell::new(false),
                viewport: Cell::new(SurfaceSize::new(1920, 1080)),
                surface: Cell::new(SurfaceSize::new(300, 150)),
                surface_resizes: Cell::new(0),
                shader_blocks: RefCell::new(BTreeMap::new()),
                time_ms: Cell::new(1_000_000.0),
                next_frame_id: Cell::new(1),
                pending_frames: RefCell::new(Vec::new()),
                cancelled_frames: RefCell::new(Vec::new()),
                frame_requests: Cell::new(0),
                scheduler_fails: Cell::new(false),
                resize_listening: Cell::new(false),
                resize_listen_fails: Cell::new(false),
                pointer_elements: Cell::new(2),
                pointer_listening: Cell::new(false),
                highlights: RefCell::new(BTreeMap::new()),
                debug_log: RefCell::new(Vec::new()),
            }),
        }
    }

    // === Configuration ===

    /// Handle to the graphics context this host hands out
    pub fn gl(&self) -> MockGl {
        self.state.gl.clone()
    }

    /// Make context acquisition fail
    pub fn set_context_available(&self, available: bool) {
        self.state.context_available.set(available);
    }

    /// Set the window viewport size (does not fire a resize event)
    pub fn set_viewport(&self, size: SurfaceSize) {
        self.state.viewport.set(size);
    }

    /// Provide a shader block under a document element id
    pub fn set_shader_block(&self, element_id: &str, source: &str) {
        self.state
            .shader_blocks
            .borrow_mut()
            .insert(element_id.to_string(), source.to_string());
    }

    /// Set the wall clock
    pub fn set_time_ms(&self, ms: f64) {
        self.state.time_ms.set(ms);
    }

    /// Advance the wall clock
    pub fn advance_time_ms(&self, ms: f64) {
        self.state.time_ms.set(self.state.time_ms.get() + ms);
    }

    /// Make frame requests fail
    pub fn set_scheduler_fails(&self, fails: bool) {
        self.state.scheduler_fails.set(fails);
    }

    /// Make resize listener registration fail
    pub fn set_resize_listen_fails(&self, fails: bool) {
        self.state.resize_listen_fails.set(fails);
    }

    /// Number of interactive elements in the document
    pub fn set_pointer_elements(&self, count: usize) {
        self.state.pointer_elements.set(count);
    }

    // === Inspection ===

    /// Number of times a graphics context was requested
    pub fn context_requests(&self) -> usize {
        self.state.context_requests.get()
    }

    pub fn is_surface_hidden(&self) -> bool {
        self.state.surface_hidden.get()
    }

    pub fn is_fallback_shown(&self) -> bool {
        self.state.fallback_shown.get()
    }

    /// Current drawing surface size
    pub fn surface_size(&self) -> SurfaceSize {
        self.state.surface.get()
    }

    /// Number of times the surface was resized
    pub fn surface_resizes(&self) -> usize {
        self.state.surface_resizes.get()
    }

    /// Total frame requests made
    pub fn frame_requests(&self) -> usize {
        self.state.frame_requests.get()
    }

    /// Frame requests not yet fired or cancelled
    pub fn pending_frames(&self) -> Vec<FrameRequest> {
        self.state.pending_frames.borrow().clone()
    }

    /// Remove and return the oldest pending frame, as the scheduler would
    /// just before invoking the frame callback
    pub fn take_pending_frame(&self) -> Option<FrameRequest> {
        let mut pending = self.state.pending_frames.borrow_mut();
        if pending.is_empty() {
            None
        } else {
            Some(pending.remove(0))
        }
    }

    /// Frame requests that were cancelled
    pub fn cancelled_frames(&self) -> Vec<FrameRequest> {
        self.state.cancelled_frames.borrow().clone()
    }

    pub fn is_resize_listening(&self) -> bool {
        self.state.resize_listening.get()
    }

    pub fn is_pointer_listening(&self) -> bool {
        self.state.pointer_listening.get()
    }

    /// Highlight coordinates last written to an element
    pub fn highlight(&self, element: usize) -> Option<(f64, f64)> {
        self.state.highlights.borrow().get(&element).copied()
    }

    /// Check if a specific message was logged
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.state
            .debug_log
            .borrow()
            .iter()
            .any(|msg| msg.contains(substr))
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformCapabilities for MockHost {
    type Gfx = MockGl;

    fn platform_signal(&self) -> String {
        self.state.signal.borrow().clone()
    }

    fn acquire_context(&self) -> Result<MockGl, HalError> {
        self.state
            .context_requests
            .set(self.state.context_requests.get() + 1);
        if self.state.context_available.get() {
            Ok(self.state.gl.clone())
        } else {
            Err(HalError::ContextUnavailable)
        }
    }
}

impl Host for MockHost {
    fn hide_surface(&self) {
        self.state.surface_hidden.set(true);
    }

    fn show_fallback(&self) {
        self.state.fallback_shown.set(true);
    }

    fn viewport_size(&self) -> SurfaceSize {
        self.state.viewport.get()
    }

    fn resize_surface(&self, size: SurfaceSize) {
        self.state.surface.set(size);
        self.state
            .surface_resizes
            .set(self.state.surface_resizes.get() + 1);
    }

    fn shader_source(&self, element_id: &str) -> Option<String> {
        self.state.shader_blocks.borrow().get(element_id).cloned()
    }

    fn now_ms(&self) -> f64 {
        self.state.time_ms.get()
    }

    fn request_frame(&self) -> Result<FrameRequest, HalError> {
        if self.state.scheduler_fails.get() {
            return Err(HalError::SchedulerUnavailable);
        }
        let id = self.state.next_frame_id.get();
        self.state.next_frame_id.set(id + 1);
        self.state
            .frame_requests
            .set(self.state.frame_requests.get() + 1);
        let request = FrameRequest::new(id);
        self.state.pending_frames.borrow_mut().push(request);
        Ok(request)
    }

    fn cancel_frame(&self, request: FrameRequest) {
        self.state
            .pending_frames
            .borrow_mut()
            .retain(|pending| *pending != request);
        self.state.cancelled_frames.borrow_mut().push(request);
    }

    fn listen_resize(&self) -> Result<(), HalError> {
        if self.state.resize_listen_fails.get() {
            return Err(HalError::ListenerFailed("resize"));
        }
        self.state.resize_listening.set(true);
        Ok(())
    }

    fn unlisten_resize(&self) {
        self.state.resize_listening.set(false);
    }

    fn listen_pointer(&self) -> Result<usize, HalError> {
        self.state.pointer_listening.set(true);
        Ok(self.state.pointer_elements.get())
    }

    fn unlisten_pointer(&self) {
        self.state.pointer_listening.set(false);
    }

    fn set_highlight(&self, element: usize, x_percent: f64, y_percent: f64) {
        self.state
            .highlights
            .borrow_mut()
            .insert(element, (x_percent, y_percent));
    }

    fn debug_write(&self, msg: &str) {
        self.state.debug_log.borrow_mut().push(msg.to_string());
    }
}

// =============================================================================
// MockGl
// =============================================================================

/// A recorded graphics command
#[derive(Clone, Debug, PartialEq)]
pub enum GlCall {
    CompileShader(ShaderStage),
    LinkProgram,
    CreateBuffer { bytes: usize },
    Viewport(SurfaceSize),
    Clear([f32; 4]),
    UseProgram(u32),
    UniformF32 { name: Option<String>, value: f32 },
    UniformVec2 { name: Option<String>, value: [f32; 2] },
    BindVertexBuffer { slot: u32, components: i32 },
    DrawTriangleStrip(i32),
}

/// Compiled mock shader
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockShader {
    pub stage: ShaderStage,
    pub source: String,
}

/// Linked mock program
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MockProgram(pub u32);

/// Uploaded mock buffer
#[derive(Clone, Debug, PartialEq)]
pub struct MockBuffer {
    pub bytes: Vec<u8>,
}

/// Resolved mock uniform slot
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockUniform(pub String);

/// Recording graphics context
#[derive(Clone)]
pub struct MockGl {
    state: Rc<GlState>,
}

struct GlState {
    calls: RefCell<Vec<GlCall>>,
    programs_created: Cell<u32>,
    fail_compile: Cell<Option<ShaderStage>>,
    fail_link: Cell<bool>,
    fail_buffer: Cell<bool>,
    missing_attribute: Cell<bool>,
    context_lost: Cell<bool>,
    pending_error: Cell<Option<u32>>,
}

impl MockGl {
    pub fn new() -> Self {
        Self {
            state: Rc::new(GlState {
                calls: RefCell::new(Vec::new()),
                programs_created: Cell::new(0),
                fail_compile: Cell::new(None),
                fail_link: Cell::new(false),
                fail_buffer: Cell::new(false),
                missing_attribute: Cell::new(false),
                context_lost: Cell::new(false),
                pending_error: Cell::new(None),
            }),
        }
    }

    // === Failure injection ===

    /// Make compilation of one stage fail
    pub fn fail_compile(&self, stage: ShaderStage) {
        self.state.fail_compile.set(Some(stage));
    }

    /// Make program linking fail
    pub fn fail_link(&self) {
        self.state.fail_link.set(true);
    }

    /// Make buffer creation fail
    pub fn fail_buffer(&self) {
        self.state.fail_buffer.set(true);
    }

    /// Pretend the linked program has no vertex inputs
    pub fn drop_attributes(&self) {
        self.state.missing_attribute.set(true);
    }

    /// Simulate context loss
    pub fn lose_context(&self) {
        self.state.context_lost.set(true);
    }

    /// Raise an API error code, reported at the next check
    pub fn raise_error(&self, code: u32) {
        self.state.pending_error.set(Some(code));
    }

    // === Inspection ===

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.state.calls.borrow_mut().clear();
    }

    /// Number of programs successfully linked
    pub fn programs_created(&self) -> u32 {
        self.state.programs_created.get()
    }

    pub fn compile_count(&self) -> usize {
        self.count(|call| matches!(call, GlCall::CompileShader(_)))
    }

    pub fn link_count(&self) -> usize {
        self.count(|call| matches!(call, GlCall::LinkProgram))
    }

    /// Vertex counts of every draw call, in order
    pub fn draw_calls(&self) -> Vec<i32> {
        self.state
            .calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GlCall::DrawTriangleStrip(count) => Some(*count),
                _ => None,
            })
            .collect()
    }

    /// Every value written to a float uniform, in order
    pub fn uniform_f32_values(&self, name: &str) -> Vec<f32> {
        self.state
            .calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                GlCall::UniformF32 {
                    name: Some(n),
                    value,
                } if n == name => Some(*value),
                _ => None,
            })
            .collect()
    }

    /// Last value written to a vec2 uniform
    pub fn last_uniform_vec2(&self, name: &str) -> Option<[f32; 2]> {
        self.state
            .calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                GlCall::UniformVec2 {
                    name: Some(n),
                    value,
                } if n == name => Some(*value),
                _ => None,
            })
    }

    fn count(&self, pred: impl Fn(&GlCall) -> bool) -> usize {
        self.state.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: GlCall) {
        self.state.calls.borrow_mut().push(call);
    }
}

impl Default for MockGl {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsContext for MockGl {
    type Shader = MockShader;
    type Program = MockProgram;
    type Buffer = MockBuffer;
    type Uniform = MockUniform;

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<MockShader, GfxError> {
        self.record(GlCall::CompileShader(stage));
        if self.state.fail_compile.get() == Some(stage) {
            return Err(GfxError::CompileFailed(alloc::format!(
                "ERROR: 0:1: '{}' : syntax error",
                stage.name()
            )));
        }
        Ok(MockShader {
            stage,
            source: source.to_string(),
        })
    }

    fn link_program(
        &self,
        _vertex: &MockShader,
        _fragment: &MockShader,
    ) -> Result<MockProgram, GfxError> {
        self.record(GlCall::LinkProgram);
        if self.state.fail_link.get() {
            return Err(GfxError::LinkFailed("varyings mismatch".to_string()));
        }
        let id = self.state.programs_created.get() + 1;
        self.state.programs_created.set(id);
        Ok(MockProgram(id))
    }

    fn uniform_location(&self, _program: &MockProgram, name: &str) -> Option<MockUniform> {
        Some(MockUniform(name.to_string()))
    }

    fn attribute_location(&self, _program: &MockProgram, _name: &str) -> Option<u32> {
        if self.state.missing_attribute.get() {
            None
        } else {
            Some(0)
        }
    }

    fn create_vertex_buffer(&self, bytes: &[u8]) -> Result<MockBuffer, GfxError> {
        self.record(GlCall::CreateBuffer { bytes: bytes.len() });
        if self.state.fail_buffer.get() {
            return Err(GfxError::ResourceCreation("buffer"));
        }
        Ok(MockBuffer {
            bytes: bytes.to_vec(),
        })
    }

    fn set_viewport(&self, size: SurfaceSize) {
        self.record(GlCall::Viewport(size));
    }

    fn clear(&self, rgba: [f32; 4]) {
        self.record(GlCall::Clear(rgba));
    }

    fn use_program(&self, program: &MockProgram) {
        self.record(GlCall::UseProgram(program.0));
    }

    fn set_uniform_f32(&self, location: Option<&MockUniform>, value: f32) {
        self.record(GlCall::UniformF32 {
            name: location.map(|u| u.0.clone()),
            value,
        });
    }

    fn set_uniform_vec2(&self, location: Option<&MockUniform>, value: [f32; 2]) {
        self.record(GlCall::UniformVec2 {
            name: location.map(|u| u.0.clone()),
            value,
        });
    }

    fn bind_vertex_buffer(&self, _buffer: &MockBuffer, slot: u32, components: i32) {
        self.record(GlCall::BindVertexBuffer { slot, components });
    }

    fn draw_triangle_strip(&self, count: i32) {
        self.record(GlCall::DrawTriangleStrip(count));
    }

    fn check_errors(&self) -> Result<(), GfxError> {
        if self.state.context_lost.get() {
            return Err(GfxError::ContextLost);
        }
        match self.state.pending_error.take() {
            Some(code) => Err(GfxError::Api(code)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_requests_are_tracked() {
        let host = MockHost::new();
        let a = host.request_frame().unwrap();
        let b = host.request_frame().unwrap();
        assert_ne!(a, b);
        assert_eq!(host.pending_frames().len(), 2);

        host.cancel_frame(a);
        assert_eq!(host.pending_frames(), alloc::vec![b]);
        assert_eq!(host.cancelled_frames(), alloc::vec![a]);
        assert_eq!(host.take_pending_frame(), Some(b));
        assert_eq!(host.take_pending_frame(), None);
    }

    #[test]
    fn test_context_failure_counts_request() {
        let host = MockHost::new();
        host.set_context_available(false);
        assert_eq!(host.acquire_context().err(), Some(HalError::ContextUnavailable));
        assert_eq!(host.context_requests(), 1);
    }

    #[test]
    fn test_gl_error_reported_once() {
        let gl = MockGl::new();
        gl.raise_error(0x0502);
        assert_eq!(gl.check_errors(), Err(GfxError::Api(0x0502)));
        assert_eq!(gl.check_errors(), Ok(()));
    }

    #[test]
    fn test_clones_share_state() {
        let host = MockHost::new();
        let other = host.clone();
        other.debug_write("[background] hello");
        assert!(host.has_log_containing("hello"));
    }
}
