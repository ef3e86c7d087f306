//! Shared CPU-side mesh representation.

/// Vertex and index arrays ready for GPU upload.
///
/// Positions and normals are homogeneous 4-component tuples (`w = 1` for
/// positions, `w = 0` for normals). When `normals` is present it has the
/// same length as `positions`; every index addresses a valid vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// One `[x, y, z, 1]` entry per vertex.
    pub positions: Vec<[f32; 4]>,
    /// One `[x, y, z, 0]` entry per vertex, or `None` for meshes without a
    /// normal channel.
    pub normals: Option<Vec<[f32; 4]>>,
    /// Triangle indices, grouped in triples.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
