//! Background quad generation.

use glam::Vec3;

use crate::mesh::MeshData;

/// Build a 2x2 quad in the XY plane centered at `center`, facing +Z.
///
/// The quad carries no normal channel; the background shader positions it in
/// clip space and does not light it.
pub fn build_quad(center: Vec3) -> MeshData {
    let corners = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];
    let positions = corners
        .iter()
        .map(|c| {
            let p = center + *c;
            [p.x, p.y, p.z, 1.0]
        })
        .collect();

    MeshData {
        positions,
        normals: None,
        indices: vec![0, 1, 2, 0, 2, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_counts() {
        let quad = build_quad(Vec3::ZERO);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn test_quad_has_no_normal_channel() {
        let quad = build_quad(Vec3::ZERO);
        assert!(quad.normals.is_none());
    }

    #[test]
    fn test_quad_translated_by_center() {
        let quad = build_quad(Vec3::new(3.0, 0.0, -1.0));
        assert_eq!(quad.positions[0], [2.0, -1.0, -1.0, 1.0]);
        assert_eq!(quad.positions[2], [4.0, 1.0, -1.0, 1.0]);
    }

    #[test]
    fn test_quad_indices_in_bounds() {
        let quad = build_quad(Vec3::ZERO);
        for &idx in &quad.indices {
            assert!(idx < 4);
        }
    }
}
