//! Scene building for the render collaborator
//!
//! Produces plain vertex data; uploading and drawing happen outside the crate.

pub mod shapes;
pub mod vertex;

pub use shapes::build_scene;
pub use vertex::Vertex;
