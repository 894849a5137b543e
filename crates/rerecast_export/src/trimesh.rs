//! The consolidated mesh that all geometry sources are collected into.

use glam::{UVec3, Vec3};

/// A triangle mesh in generator space, as written to the OBJ file.
///
/// The vertices double as the flat coordinate buffer and the triangles as the flat index buffer,
/// see [`TriMesh::coord_buffer`] and [`TriMesh::index_buffer`].
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct TriMesh {
    /// The vertices composing the mesh.
    /// Follows the convention of a triangle list.
    pub vertices: Vec<Vec3>,

    /// The indices composing the mesh.
    /// Follows the convention of a triangle list.
    pub indices: Vec<UVec3>,
}

impl TriMesh {
    /// Extends the trimesh with the vertices and indices of another trimesh.
    /// The indices of `other` will be offset by the number of vertices in `self`.
    pub fn extend(&mut self, other: TriMesh) {
        let next_vertex_index = self.next_vertex_index();
        self.vertices.extend(other.vertices);
        self.indices
            .extend(other.indices.iter().map(|i| i + next_vertex_index));
    }

    /// Appends triangles first and vertices second, rebasing the triangles onto the current vertex count.
    /// The caller guarantees that the triangles only reference the appended vertices.
    pub fn append(
        &mut self,
        triangles: impl IntoIterator<Item = UVec3>,
        vertices: impl IntoIterator<Item = Vec3>,
    ) {
        let next_vertex_index = self.next_vertex_index();
        self.indices
            .extend(triangles.into_iter().map(|i| i + next_vertex_index));
        self.vertices.extend(vertices);
    }

    /// Reserves capacity for at least `vertices` more vertices and `triangles` more triangles.
    pub fn reserve(&mut self, vertices: usize, triangles: usize) {
        self.vertices.reserve(vertices);
        self.indices.reserve(triangles);
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Whether the mesh has no vertices and no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.indices.is_empty()
    }

    /// The vertices as a flat `[x, y, z, x, y, z, ...]` buffer.
    #[inline]
    pub fn coord_buffer(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// The triangles as a flat `[i0, i1, i2, i0, i1, i2, ...]` buffer of 0-based indices.
    #[inline]
    pub fn index_buffer(&self) -> &[u32] {
        bytemuck::cast_slice(&self.indices)
    }

    fn next_vertex_index(&self) -> u32 {
        if self.vertices.len() > u32::MAX as usize {
            panic!("Cannot extend a trimesh with more than 2^32 vertices");
        }
        self.vertices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> TriMesh {
        TriMesh {
            vertices: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            indices: vec![UVec3::new(0, 1, 2)],
        }
    }

    #[test]
    fn extend_rebases_indices() {
        let mut mesh = triangle();
        mesh.extend(triangle());
        mesh.extend(triangle());
        assert_eq!(mesh.vertex_count(), 9);
        assert_eq!(
            mesh.indices,
            vec![
                UVec3::new(0, 1, 2),
                UVec3::new(3, 4, 5),
                UVec3::new(6, 7, 8)
            ]
        );
    }

    #[test]
    fn append_rebases_indices_before_adding_vertices() {
        let mut mesh = triangle();
        mesh.append([UVec3::new(2, 1, 0)], [Vec3::Z, Vec3::ONE, Vec3::NEG_ONE]);
        assert_eq!(mesh.indices[1], UVec3::new(5, 4, 3));
        assert_eq!(mesh.vertex_count(), 6);
    }

    #[test]
    fn flat_buffers_are_triples() {
        let mesh = triangle();
        assert_eq!(
            mesh.coord_buffer(),
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]
        );
        assert_eq!(mesh.index_buffer(), &[0, 1, 2]);
    }
}
