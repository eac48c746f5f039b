//! WebGPU rendering module
//!
//! Builds a flat list of colored triangles in view space (400x600, y down)
//! and draws them with a single pipeline.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
