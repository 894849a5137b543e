//! Static level geometry arrives as an unindexed vertex soup in host space.

use glam::{UVec3, Vec3};

use crate::{AxisConvention, TriMesh};

/// Turns a host-space vertex soup into an indexed generator-space [`TriMesh`].
///
/// Every input triangle gets its own three vertices. The face indices are written in reverse
/// order, since the axis conversion flips handedness and would otherwise flip every normal.
///
/// # Panics
///
/// Panics if the length of `vertex_soup` is not a multiple of 3, or if it holds more than `u32::MAX` vertices.
pub fn transform_vertex_soup(vertex_soup: &[Vec3], convention: &impl AxisConvention) -> TriMesh {
    assert!(
        vertex_soup.len().is_multiple_of(3),
        "Vertex soup length {} is not a multiple of 3",
        vertex_soup.len()
    );
    assert!(
        vertex_soup.len() <= u32::MAX as usize,
        "Vertex soup has more than 2^32 vertices"
    );

    let mut mesh = TriMesh::default();
    mesh.reserve(vertex_soup.len(), vertex_soup.len() / 3);
    for (triangle, vertices) in vertex_soup.chunks_exact(3).enumerate() {
        let base = triangle as u32 * 3;
        mesh.vertices
            .extend(vertices.iter().map(|v| convention.to_generator_point(*v)));
        mesh.indices.push(UVec3::new(base + 2, base + 1, base));
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Identity, ZUpToYUp};

    #[test]
    fn every_triangle_gets_own_vertices_and_reversed_indices() {
        let soup: Vec<Vec3> = (0..6).map(|i| Vec3::splat(i as f32)).collect();
        let mesh = transform_vertex_soup(&soup, &Identity);
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.indices, vec![UVec3::new(2, 1, 0), UVec3::new(5, 4, 3)]);
        assert_eq!(mesh.vertices, soup);
    }

    #[test]
    fn vertices_are_converted() {
        let soup = [Vec3::new(1.0, 2.0, 3.0), Vec3::X, Vec3::Y];
        let mesh = transform_vertex_soup(&soup, &ZUpToYUp);
        assert_eq!(mesh.vertices[0], Vec3::new(-1.0, 3.0, -2.0));
        assert_eq!(mesh.vertices[2], Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn empty_soup_yields_empty_mesh() {
        assert!(transform_vertex_soup(&[], &Identity).is_empty());
    }

    #[test]
    #[should_panic(expected = "not a multiple of 3")]
    fn incomplete_triangle_panics() {
        transform_vertex_soup(&[Vec3::ZERO, Vec3::X], &Identity);
    }
}
