//! CPU-side mesh generation for the fireball viewer: subdivided icosphere
//! and the background quad.

mod icosphere;
mod mesh;
mod quad;

pub use icosphere::build_icosphere;
pub use mesh::MeshData;
pub use quad::build_quad;
