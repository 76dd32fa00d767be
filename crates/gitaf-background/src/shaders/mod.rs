mod starfield;
mod vertex;

pub use starfield::SHADER_STARFIELD;
pub use vertex::SHADER_VERTEX;

/// Uniform slot carrying elapsed seconds
pub const UNIFORM_TIME: &str = "uTime";

/// Uniform slot carrying the surface resolution in pixels
pub const UNIFORM_RESOLUTION: &str = "uResolution";

/// Vertex input slot for the clip-space quad
pub const ATTRIBUTE_POSITION: &str = "position";
