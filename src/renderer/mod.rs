//! WebGPU rendering module
//!
//! Flat-colored triangle lists; the playfield is already in clip space.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::{Palette, Vertex};
