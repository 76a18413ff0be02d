//! WebGPU rendering module
//!
//! The scene is rebuilt every frame as a flat-colored triangle list in
//! canvas pixels, then letterboxed into the surface by the pipeline.

pub mod background;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod sprite;
pub mod vertex;

pub use background::Background;
pub use pipeline::{RenderState, screen_to_ndc};
pub use scene::{SceneAssets, build_scene};
pub use sprite::SpriteSheet;
pub use vertex::Vertex;
