mod init;
mod render;

use gitaf_hal::{ElementBounds, FrameRequest, Host, SurfaceSize};

use crate::clock::AnimationClock;
use crate::config::RendererConfig;
use crate::device::DeviceClass;
use crate::error::RenderError;
use crate::highlight::HighlightPosition;
use crate::state::RendererState;
use crate::uniforms::Uniforms;
use crate::viewport::Viewport;

use init::{create_resources, GpuResources, ShaderSources};
use render::draw_frame;

pub use render::CLEAR_COLOR;

/// Adaptive background renderer
///
/// Owns all per-mount state. The host drives it through four entry points,
/// all on one thread: [`initialize`](Self::initialize) once on mount,
/// [`on_frame`](Self::on_frame) from the frame scheduler,
/// [`on_resize`](Self::on_resize) / [`on_pointer_move`](Self::on_pointer_move)
/// from event listeners, and [`teardown`](Self::teardown) on unmount.
pub struct BackgroundRenderer<H: Host> {
    host: H,
    config: RendererConfig,
    state: RendererState,
    device: Option<DeviceClass>,
    resources: Option<GpuResources<H::Gfx>>,
    viewport: Viewport,
    clock: Option<AnimationClock>,
    /// Liveness gate checked by every frame
    running: bool,
    pending_frame: Option<FrameRequest>,
    resize_listening: bool,
    pointer_targets: Option<usize>,
    frames_drawn: u64,
    last_error: Option<RenderError>,
}

impl<H: Host> BackgroundRenderer<H> {
    /// Create an uninitialized renderer
    pub fn new(host: H, config: RendererConfig) -> Self {
        Self {
            host,
            config,
            state: RendererState::Uninitialized,
            device: None,
            resources: None,
            viewport: Viewport::default(),
            clock: None,
            running: false,
            pending_frame: None,
            resize_listening: false,
            pointer_targets: None,
            frames_drawn: 0,
            last_error: None,
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Classify the device and start whichever background path applies
    ///
    /// Never fails outward: setup errors are logged, recorded in
    /// [`last_error`](Self::last_error), and reflected in the returned state.
    pub fn initialize(&mut self) -> RendererState {
        if self.state != RendererState::Uninitialized {
            self.log(&format!(
                "[background] initialize ignored in state '{}'",
                self.state.id()
            ));
            return self.state;
        }

        let signal = self.host.platform_signal();
        let device = DeviceClass::classify(&signal, &self.config.mobile_identifiers);
        self.device = Some(device);

        if device == DeviceClass::Mobile {
            self.host.hide_surface();
            self.state = RendererState::Disabled;
            self.log("[background] Mobile device detected, using CSS background");
            return self.state;
        }

        self.state = RendererState::Initializing;
        match self.setup() {
            Ok(()) => self.start_loop(),
            Err(e) => self.abort_setup(e),
        }
        self.state
    }

    /// Acquire the context and build everything the frame loop needs
    fn setup(&mut self) -> Result<(), RenderError> {
        let gl = self.host.acquire_context()?;

        self.apply_viewport();
        self.host.listen_resize()?;
        self.resize_listening = true;

        let sources = ShaderSources::resolve(&self.host, &self.config);
        self.resources = Some(create_resources(gl, &sources)?);

        self.attach_pointer_listeners();
        Ok(())
    }

    /// Undo partial setup and settle in a terminal state
    fn abort_setup(&mut self, err: RenderError) {
        self.log(&format!("[background] {}", err));

        if self.resize_listening {
            self.host.unlisten_resize();
            self.resize_listening = false;
        }
        self.resources = None;
        self.last_error = Some(err);

        if self.config.fallback_on_setup_failure {
            self.host.hide_surface();
            self.host.show_fallback();
            self.state = RendererState::Fallback;
            self.log("[background] Falling back to CSS background");
        } else {
            self.state = RendererState::Stopped;
        }
    }

    fn attach_pointer_listeners(&mut self) {
        match self.host.listen_pointer() {
            Ok(count) => self.pointer_targets = Some(count),
            // Cosmetic only; the background still runs
            Err(e) => self.log(&format!("[background] Pointer highlight disabled: {}", e)),
        }
    }

    fn start_loop(&mut self) {
        self.running = true;
        self.clock = Some(AnimationClock::start(self.host.now_ms()));
        self.state = RendererState::Running;
        self.log(&format!(
            "[background] Rendering at {}x{}",
            self.viewport.size().width,
            self.viewport.size().height
        ));
        self.render_frame();
    }

    /// Draw one frame and schedule the next
    ///
    /// A no-op that does not reschedule when the renderer is not running.
    /// Any failure stops the loop for good; the last drawn frame stays on
    /// screen. At most one frame request is outstanding afterwards.
    pub fn render_frame(&mut self) {
        if !self.running {
            return;
        }
        let (Some(resources), Some(clock)) = (self.resources.as_ref(), self.clock.as_mut()) else {
            return;
        };

        let uniforms = Uniforms::for_frame(clock, &self.viewport, self.host.now_ms());
        if let Err(e) = draw_frame(resources, self.viewport.size(), &uniforms) {
            self.stop_with(e);
            return;
        }
        self.frames_drawn += 1;

        if let Some(stale) = self.pending_frame.take() {
            self.host.cancel_frame(stale);
        }
        match self.host.request_frame() {
            Ok(request) => self.pending_frame = Some(request),
            Err(e) => self.stop_with(e.into()),
        }
    }

    fn stop_with(&mut self, err: RenderError) {
        self.log(&format!("[background] {}", err));
        self.running = false;
        self.state = RendererState::Stopped;
        self.last_error = Some(err);
    }

    /// Scheduler callback: the pending frame request has fired
    pub fn on_frame(&mut self) {
        self.pending_frame = None;
        self.render_frame();
    }

    /// Stop the loop and release every host registration
    ///
    /// Idempotent. GPU objects are left for the host to reclaim with the
    /// surface.
    pub fn teardown(&mut self) {
        self.running = false;

        if self.resize_listening {
            self.host.unlisten_resize();
            self.resize_listening = false;
        }
        if let Some(request) = self.pending_frame.take() {
            self.host.cancel_frame(request);
        }
        if self.pointer_targets.take().is_some() {
            self.host.unlisten_pointer();
        }

        if self.state != RendererState::Stopped {
            self.log("[background] Stopped");
            self.state = RendererState::Stopped;
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Keep the surface pixel-sized to the window
    pub fn on_resize(&mut self) {
        if !self.resize_listening {
            return;
        }
        self.apply_viewport();
    }

    fn apply_viewport(&mut self) {
        let size = self.host.viewport_size();
        self.host.resize_surface(size);
        self.viewport.resize(size);
    }

    /// Move the highlight of call-to-action `element` under the cursor
    ///
    /// Returns the written position, or `None` if pointer listeners are
    /// not attached or the element is unknown.
    pub fn on_pointer_move(
        &mut self,
        element: usize,
        client_x: f64,
        client_y: f64,
        bounds: ElementBounds,
    ) -> Option<HighlightPosition> {
        let targets = self.pointer_targets?;
        if element >= targets {
            return None;
        }
        let pos = HighlightPosition::from_pointer(client_x, client_y, bounds);
        self.host.set_highlight(element, pos.x, pos.y);
        Some(pos)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    pub fn state(&self) -> RendererState {
        self.state
    }

    /// Device class, once initialized
    pub fn device(&self) -> Option<DeviceClass> {
        self.device
    }

    /// Current value of the liveness gate
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Error that stopped the renderer, if any
    pub fn last_error(&self) -> Option<&RenderError> {
        self.last_error.as_ref()
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Surface size used by the next frame
    pub fn viewport(&self) -> SurfaceSize {
        self.viewport.size()
    }

    /// Frame request awaiting the scheduler
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.pending_frame
    }

    fn log(&self, msg: &str) {
        self.host.debug_write(msg);
    }
}
