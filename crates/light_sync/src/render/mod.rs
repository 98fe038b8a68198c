//! Renderer-side owners of lights
//!
//! - [`RenderParam`]: acceleration scene and loader shared by all lights
//! - [`LightSet`]: the lights of a scene and their change tracking

pub mod light_set;
pub mod render_param;

pub use light_set::LightSet;
pub use render_param::RenderParam;
