//! Icosphere generation by repeated triangle subdivision.

use glam::Vec3;
use std::collections::HashMap;

use crate::mesh::MeshData;

/// Build a subdivided icosphere centered at `center` with the given radius.
///
/// Starts from the regular 12-vertex icosahedron and, for each subdivision
/// round, splits every face into four by pushing edge midpoints out onto the
/// sphere. Midpoints on edges shared between adjacent faces are deduplicated
/// through an edge-keyed cache, so the output has no seam vertices.
///
/// Vertex count is `10 * 4^k + 2` and triangle count `20 * 4^k` for
/// `subdivisions = k`; `k = 0` returns the raw icosahedron. Normals are the
/// outward radial unit vectors. Output ordering is deterministic for equal
/// inputs.
pub fn build_icosphere(center: Vec3, radius: f32, subdivisions: u32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;

    // Unit directions of the icosahedron vertices.
    let mut directions: Vec<Vec3> = vec![
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ];
    for d in &mut directions {
        *d = d.normalize();
    }

    let mut indices: Vec<u32> = vec![
        0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, 1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7,
        1, 8, 3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, 4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9,
        8, 1,
    ];

    for _ in 0..subdivisions {
        subdivide(&mut directions, &mut indices);
    }

    let positions = directions
        .iter()
        .map(|d| {
            let p = center + *d * radius;
            [p.x, p.y, p.z, 1.0]
        })
        .collect();
    let normals = directions.iter().map(|d| [d.x, d.y, d.z, 0.0]).collect();

    MeshData {
        positions,
        normals: Some(normals),
        indices,
    }
}

/// Split every triangle into four, reusing midpoints on shared edges.
fn subdivide(directions: &mut Vec<Vec3>, indices: &mut Vec<u32>) {
    // Edge key is the index pair with the smaller index first, so both faces
    // sharing an edge resolve to the same midpoint vertex.
    let mut midpoint_cache: HashMap<(u32, u32), u32> = HashMap::new();
    let mut new_indices = Vec::with_capacity(indices.len() * 4);

    let mut midpoint = |a: u32, b: u32, dirs: &mut Vec<Vec3>| -> u32 {
        let key = if a < b { (a, b) } else { (b, a) };
        if let Some(&idx) = midpoint_cache.get(&key) {
            return idx;
        }
        let mid = (dirs[a as usize] + dirs[b as usize]).normalize();
        let idx = dirs.len() as u32;
        dirs.push(mid);
        midpoint_cache.insert(key, idx);
        idx
    };

    for tri in indices.chunks(3) {
        let (a, b, c) = (tri[0], tri[1], tri[2]);
        let ab = midpoint(a, b, directions);
        let bc = midpoint(b, c, directions);
        let ca = midpoint(c, a, directions);

        new_indices.extend_from_slice(&[a, ab, ca]);
        new_indices.extend_from_slice(&[b, bc, ab]);
        new_indices.extend_from_slice(&[c, ca, bc]);
        new_indices.extend_from_slice(&[ab, bc, ca]);
    }

    *indices = new_indices;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_and_triangle_counts() {
        for k in 0..4u32 {
            let mesh = build_icosphere(Vec3::ZERO, 1.0, k);
            let expected_vertices = 10 * 4usize.pow(k) + 2;
            let expected_triangles = 20 * 4usize.pow(k);
            assert_eq!(
                mesh.vertex_count(),
                expected_vertices,
                "vertex count at k = {k}"
            );
            assert_eq!(
                mesh.triangle_count(),
                expected_triangles,
                "triangle count at k = {k}"
            );
        }
    }

    #[test]
    fn test_base_icosahedron_at_unit_distance() {
        let mesh = build_icosphere(Vec3::ZERO, 1.0, 0);
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.triangle_count(), 20);
        for p in &mesh.positions {
            let len = Vec3::new(p[0], p[1], p[2]).length();
            assert!((len - 1.0).abs() < 1e-5, "vertex not on unit sphere: {len}");
        }
    }

    #[test]
    fn test_vertices_at_radius_from_center() {
        let center = Vec3::new(2.0, -1.0, 0.5);
        let radius = 3.0;
        let mesh = build_icosphere(center, radius, 3);
        for p in &mesh.positions {
            let dist = (Vec3::new(p[0], p[1], p[2]) - center).length();
            assert!(
                (dist - radius).abs() < 1e-4,
                "vertex at distance {dist}, expected {radius}"
            );
        }
    }

    #[test]
    fn test_normals_are_outward_radial_unit_vectors() {
        let center = Vec3::new(1.0, 2.0, 3.0);
        let mesh = build_icosphere(center, 2.0, 2);
        let normals = mesh.normals.as_ref().unwrap();
        assert_eq!(normals.len(), mesh.positions.len());
        for (p, n) in mesh.positions.iter().zip(normals) {
            let radial = (Vec3::new(p[0], p[1], p[2]) - center).normalize();
            let normal = Vec3::new(n[0], n[1], n[2]);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert!((normal - radial).length() < 1e-4);
            assert_eq!(n[3], 0.0, "normal w component must be 0");
        }
    }

    #[test]
    fn test_position_w_component_is_one() {
        let mesh = build_icosphere(Vec3::ZERO, 1.0, 1);
        for p in &mesh.positions {
            assert_eq!(p[3], 1.0);
        }
    }

    #[test]
    fn test_no_duplicate_seam_vertices() {
        for k in 1..4u32 {
            let mesh = build_icosphere(Vec3::ZERO, 1.0, k);
            for i in 0..mesh.positions.len() {
                for j in (i + 1)..mesh.positions.len() {
                    let a = Vec3::from_slice(&mesh.positions[i][..3]);
                    let b = Vec3::from_slice(&mesh.positions[j][..3]);
                    assert!(
                        (a - b).length() > 1e-6,
                        "duplicate vertices {i} and {j} at k = {k}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        let mesh = build_icosphere(Vec3::ZERO, 1.0, 3);
        let n = mesh.vertex_count() as u32;
        for &idx in &mesh.indices {
            assert!(idx < n, "index {idx} out of bounds (vertex count {n})");
        }
    }

    #[test]
    fn test_deterministic_output() {
        let a = build_icosphere(Vec3::new(0.5, 0.0, 0.0), 1.5, 2);
        let b = build_icosphere(Vec3::new(0.5, 0.0, 0.0), 1.5, 2);
        assert_eq!(a, b);
    }
}
