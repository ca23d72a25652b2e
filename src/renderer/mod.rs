//! WebGPU rendering module
//!
//! Draws the playfield with solid shapes; no sprite assets are required, so
//! there is nothing to fail to load.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, playfield_to_ndc};
pub use shapes::SceneStyle;
