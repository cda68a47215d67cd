//! Rendering support
//!
//! Turns a [`crate::sim::Frame`] into plain triangle lists. Drawing them is
//! left to whatever windowing and GPU layer embeds the simulation.

pub mod shapes;
pub mod vertex;

pub use shapes::frame_vertices;
pub use vertex::Vertex;
