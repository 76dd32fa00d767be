//! Host abstraction layer for the GITAF landing background
//!
//! This crate defines the traits that let the background renderer run
//! against different hosts by abstracting every ambient browser signal and
//! every GPU command it needs.
//!
//! # Host Implementations
//!
//! - **Browser**: `gitaf-web` (DOM, `requestAnimationFrame`, WebGL 1)
//! - **Tests**: `gitaf-hal-mock` (recorded calls, injectable failures)
//!
//! The renderer never touches the DOM directly. It queries a
//! [`PlatformCapabilities`] probe once at initialization, drives the
//! surface, scheduler and listeners through [`Host`], and issues GPU
//! commands through [`GraphicsContext`].

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::fmt;

// =============================================================================
// Value types
// =============================================================================

/// Pixel dimensions of the drawing surface or the host viewport
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Create a new size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Dimensions as a float pair, in the order shaders expect
    #[inline]
    pub fn as_vec2(&self) -> [f32; 2] {
        [self.width as f32, self.height as f32]
    }
}

/// Handle to a pending frame request on the host scheduler
///
/// On the browser this is the id returned by `requestAnimationFrame`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(i32);

impl FrameRequest {
    /// Wrap a raw scheduler id
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw scheduler id
    #[inline]
    pub fn id(&self) -> i32 {
        self.0
    }
}

/// Programmable pipeline stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Lowercase stage name for diagnostics
    pub fn name(&self) -> &'static str {
        match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Fragment => "fragment",
        }
    }
}

/// Client-space rectangle of an interactive element
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ElementBounds {
    /// Create bounds from a client rect
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Host errors
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HalError {
    /// No graphics context could be created for the drawing surface
    ContextUnavailable,
    /// A required document element is missing
    ElementNotFound(String),
    /// The host refused to schedule a frame
    SchedulerUnavailable,
    /// Registering an event listener failed
    ListenerFailed(&'static str),
    /// Operation not supported on this host
    NotSupported,
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::ContextUnavailable => write!(f, "graphics context unavailable"),
            HalError::ElementNotFound(id) => write!(f, "element not found: {}", id),
            HalError::SchedulerUnavailable => write!(f, "frame scheduler unavailable"),
            HalError::ListenerFailed(event) => write!(f, "failed to register '{}' listener", event),
            HalError::NotSupported => write!(f, "operation not supported"),
        }
    }
}

/// Graphics API errors
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GfxError {
    /// The context was lost (GPU reset, tab backgrounded, driver crash)
    ContextLost,
    /// Shader compilation failed, with the driver info log
    CompileFailed(String),
    /// Program link failed, with the driver info log
    LinkFailed(String),
    /// A GPU object could not be created
    ResourceCreation(&'static str),
    /// The API reported an error code
    Api(u32),
}

impl fmt::Display for GfxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GfxError::ContextLost => write!(f, "context lost"),
            GfxError::CompileFailed(log) => write!(f, "compile failed: {}", log),
            GfxError::LinkFailed(log) => write!(f, "link failed: {}", log),
            GfxError::ResourceCreation(what) => write!(f, "could not create {}", what),
            GfxError::Api(code) => write!(f, "graphics API error 0x{:04x}", code),
        }
    }
}

// =============================================================================
// Traits
// =============================================================================

/// Capability probe queried once at initialization
pub trait PlatformCapabilities {
    /// Graphics context type produced by this platform
    type Gfx: GraphicsContext;

    /// Device signal string used for mobile classification
    ///
    /// On the browser: `navigator.userAgent`
    fn platform_signal(&self) -> String;

    /// Acquire a real-time graphics context bound to the drawing surface
    ///
    /// # Returns
    /// * `Ok(Gfx)` - Context ready for use
    /// * `Err(HalError::ContextUnavailable)` - Unsupported or denied
    fn acquire_context(&self) -> Result<Self::Gfx, HalError>;
}

/// Everything else the renderer needs from its environment
pub trait Host: PlatformCapabilities {
    // === Surface ===

    /// Hide the drawing surface
    fn hide_surface(&self);

    /// Force the declarative fallback layer visible
    fn show_fallback(&self);

    /// Current viewport (window) size in pixels
    fn viewport_size(&self) -> SurfaceSize;

    /// Set the drawing surface's pixel dimensions
    fn resize_surface(&self, size: SurfaceSize);

    /// Text of a shader block embedded in the document, if present
    fn shader_source(&self, element_id: &str) -> Option<String>;

    // === Scheduler ===

    /// Wall-clock time in milliseconds
    ///
    /// On the browser: `Date.now()`
    fn now_ms(&self) -> f64;

    /// Request that the frame callback runs before the next repaint
    fn request_frame(&self) -> Result<FrameRequest, HalError>;

    /// Cancel a pending frame request
    fn cancel_frame(&self, request: FrameRequest);

    // === Events ===

    /// Register the window resize listener
    fn listen_resize(&self) -> Result<(), HalError>;

    /// Unregister the window resize listener
    fn unlisten_resize(&self);

    /// Register pointer-move listeners on every interactive element
    ///
    /// Returns the number of elements that received a listener.
    fn listen_pointer(&self) -> Result<usize, HalError>;

    /// Unregister all pointer-move listeners
    fn unlisten_pointer(&self);

    /// Write normalized highlight coordinates (percent) to an element
    fn set_highlight(&self, element: usize, x_percent: f64, y_percent: f64);

    // === Debug ===

    /// Write a diagnostic message to the host's console
    fn debug_write(&self, msg: &str);
}

/// GPU command interface used by the renderer
///
/// Modeled on WebGL 1: shaders and programs are compiled from source text,
/// uniforms and vertex inputs are addressed by slot.
pub trait GraphicsContext {
    type Shader;
    type Program;
    type Buffer;
    type Uniform;

    /// Compile one shader stage
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<Self::Shader, GfxError>;

    /// Link a vertex and fragment stage into one program
    fn link_program(
        &self,
        vertex: &Self::Shader,
        fragment: &Self::Shader,
    ) -> Result<Self::Program, GfxError>;

    /// Resolve a uniform slot; `None` if the program has no such uniform
    fn uniform_location(&self, program: &Self::Program, name: &str) -> Option<Self::Uniform>;

    /// Resolve a vertex input slot; `None` if the program has no such input
    fn attribute_location(&self, program: &Self::Program, name: &str) -> Option<u32>;

    /// Upload static vertex data
    fn create_vertex_buffer(&self, bytes: &[u8]) -> Result<Self::Buffer, GfxError>;

    /// Set the drawing viewport
    fn set_viewport(&self, size: SurfaceSize);

    /// Clear the color buffer
    fn clear(&self, rgba: [f32; 4]);

    /// Bind a program for subsequent uniform writes and draws
    fn use_program(&self, program: &Self::Program);

    /// Write a float uniform
    fn set_uniform_f32(&self, location: Option<&Self::Uniform>, value: f32);

    /// Write a vec2 uniform
    fn set_uniform_vec2(&self, location: Option<&Self::Uniform>, value: [f32; 2]);

    /// Bind a float vertex buffer to an input slot
    fn bind_vertex_buffer(&self, buffer: &Self::Buffer, slot: u32, components: i32);

    /// Draw `count` vertices as a triangle strip
    fn draw_triangle_strip(&self, count: i32);

    /// Report context loss or an error raised since the last check
    ///
    /// Context loss must be reported on every call; the API error state
    /// may be sampled less often.
    fn check_errors(&self) -> Result<(), GfxError>;
}
