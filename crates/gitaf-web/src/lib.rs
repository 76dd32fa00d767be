//! Browser bindings for the GITAF landing background
//!
//! Exposes [`BackgroundController`] to the page. Everything browser-specific
//! lives here; the lifecycle itself is in `gitaf_background`.
//!
//! - [`host`]: DOM implementation of the host traits
//! - [`gl`]: WebGL 1 implementation of the graphics interface
//! - [`controller`]: the exported wrapper and its event wiring

pub mod controller;
pub mod gl;
pub mod host;
pub mod util;

pub use controller::{parse_config, BackgroundController};
pub use gl::WebGl;
pub use host::WebHost;
