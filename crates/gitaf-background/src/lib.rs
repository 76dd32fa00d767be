//! Adaptive Background Renderer for the GITAF landing page
//!
//! Full-viewport starfield/nebula shader behind the landing page, with a
//! CSS-only fallback for mobile devices.
//!
//! ## Architecture
//!
//! - [`device`]: user-agent classification into mobile/desktop
//! - [`config`]: startup configuration, deserialized from page JSON
//! - [`shaders`]: fixed GLSL stages and their slot names
//! - [`geometry`]: the static clip-space quad
//! - [`clock`], [`viewport`], [`uniforms`]: per-frame inputs
//! - [`highlight`]: pointer highlight math for call-to-action elements
//! - [`BackgroundRenderer`]: the lifecycle state machine
//!
//! ## Example
//!
//! ```rust
//! use gitaf_background::{BackgroundRenderer, RendererConfig, RendererState};
//! use gitaf_hal_mock::MockHost;
//!
//! let host = MockHost::new();
//! let mut renderer = BackgroundRenderer::new(host.clone(), RendererConfig::default());
//!
//! assert_eq!(renderer.initialize(), RendererState::Running);
//! assert_eq!(host.gl().draw_calls(), vec![4]);
//!
//! renderer.teardown();
//! assert_eq!(renderer.state(), RendererState::Stopped);
//! ```
//!
//! ## Design Principles
//!
//! 1. **No ambient state**: every browser signal comes through the
//!    `gitaf_hal::Host` trait, so the whole lifecycle is testable without a browser
//! 2. **One owner**: all renderer state lives in one struct; callbacks call methods on it
//! 3. **Errors stay inside**: failures are logged and end the mount, they never propagate to the page

pub mod clock;
pub mod config;
pub mod device;
pub mod geometry;
pub mod highlight;
pub mod shaders;
pub mod uniforms;
pub mod viewport;

mod error;
mod renderer;
mod state;

pub use clock::AnimationClock;
pub use config::RendererConfig;
pub use device::DeviceClass;
pub use error::RenderError;
pub use highlight::HighlightPosition;
pub use renderer::{BackgroundRenderer, CLEAR_COLOR};
pub use state::RendererState;
pub use uniforms::Uniforms;
pub use viewport::Viewport;

// Host types callers need alongside the renderer
pub use gitaf_hal::{ElementBounds, SurfaceSize};
