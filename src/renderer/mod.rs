//! WebGPU rendering: flat-colored triangles mapped through the fitted viewport

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::scene;
pub use vertex::Vertex;
