//! Renderables, shape presets and the GPU backend that draws them.

mod frame;
pub(crate) mod graphics;
mod renderable;
mod shape;

pub use frame::{DrawCommand, RenderList, Vertex};
pub use renderable::Renderable;
pub use shape::{Rectangle, Shape, Square, Triangle, DEFAULT_SIZE};
