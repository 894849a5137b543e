//! The geometry cache is the collision geometry of a navigation element, baked into a single byte buffer:
//!
//! ```text
//! [GeometryCacheHeader][num_verts * 3 x f32][num_faces * 3 x u32]
//! ```
//!
//! Vertices are already in generator space. Values use native endianness.
//! [`GeometryCache`] validates the buffer once and then hands out views that borrow it.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use glam::{UVec3, Vec3};
use thiserror::Error;

/// The fixed-size header at the start of a geometry cache buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryCacheHeader {
    /// Number of vertices. Each vertex is three `f32`s.
    pub num_verts: u32,
    /// Number of triangles. Each triangle is three `u32` indices.
    pub num_faces: u32,
}

impl GeometryCacheHeader {
    /// Size of the header in bytes.
    pub const SIZE: usize = size_of::<GeometryCacheHeader>();

    const VERTEX_SIZE: u64 = 3 * size_of::<f32>() as u64;
    const FACE_SIZE: u64 = 3 * size_of::<u32>() as u64;

    /// The total buffer length this header describes, header included.
    pub fn buffer_len(&self) -> u64 {
        Self::SIZE as u64
            + self.num_verts as u64 * Self::VERTEX_SIZE
            + self.num_faces as u64 * Self::FACE_SIZE
    }
}

/// A validated, read-only view over a geometry cache buffer.
///
/// The view never owns its bytes and cannot outlive them.
#[derive(Debug, Clone, Copy)]
pub struct GeometryCache<'a> {
    header: GeometryCacheHeader,
    verts: &'a [u8],
    indices: &'a [u8],
}

impl<'a> GeometryCache<'a> {
    /// Interprets `bytes` as a geometry cache.
    ///
    /// Fails if the buffer length does not match the header exactly,
    /// or if any triangle references a vertex that does not exist.
    pub fn decode(bytes: &'a [u8]) -> Result<Self, GeometryCacheError> {
        if bytes.len() < GeometryCacheHeader::SIZE {
            return Err(GeometryCacheError::TooShort { len: bytes.len() });
        }
        let (header_bytes, rest) = bytes.split_at(GeometryCacheHeader::SIZE);
        let header: GeometryCacheHeader = bytemuck::pod_read_unaligned(header_bytes);

        let expected = header.buffer_len();
        if expected != bytes.len() as u64 {
            return Err(GeometryCacheError::LengthMismatch {
                num_verts: header.num_verts,
                num_faces: header.num_faces,
                expected,
                actual: bytes.len(),
            });
        }

        let verts_len = header.num_verts as usize * GeometryCacheHeader::VERTEX_SIZE as usize;
        let (verts, indices) = rest.split_at(verts_len);
        let cache = Self {
            header,
            verts,
            indices,
        };

        for (triangle, face) in cache.triangles().enumerate() {
            if let Some(&index) = face.to_array().iter().find(|&&i| i >= header.num_verts) {
                return Err(GeometryCacheError::IndexOutOfBounds {
                    triangle,
                    index,
                    num_verts: header.num_verts,
                });
            }
        }
        Ok(cache)
    }

    /// Number of vertices in the cache.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.header.num_verts as usize
    }

    /// Number of triangles in the cache.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.header.num_faces as usize
    }

    /// The vertices, in generator space.
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = Vec3> + use<'a> {
        self.verts
            .chunks_exact(GeometryCacheHeader::VERTEX_SIZE as usize)
            .map(|chunk| Vec3::from_array(bytemuck::pod_read_unaligned(chunk)))
    }

    /// The triangles as 0-based indices into [`Self::vertices`].
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = UVec3> + use<'a> {
        self.indices
            .chunks_exact(GeometryCacheHeader::FACE_SIZE as usize)
            .map(|chunk| UVec3::from_array(bytemuck::pod_read_unaligned(chunk)))
    }

    /// Bakes vertices and triangles into the buffer layout read by [`GeometryCache::decode`].
    ///
    /// # Panics
    ///
    /// Panics if there are more than `u32::MAX` vertices or triangles.
    pub fn encode(vertices: &[Vec3], triangles: &[UVec3]) -> Vec<u8> {
        let header = GeometryCacheHeader {
            num_verts: u32::try_from(vertices.len()).expect("too many vertices for a geometry cache"),
            num_faces: u32::try_from(triangles.len())
                .expect("too many triangles for a geometry cache"),
        };
        let mut bytes = Vec::with_capacity(header.buffer_len() as usize);
        bytes.extend_from_slice(bytemuck::bytes_of(&header));
        bytes.extend_from_slice(bytemuck::cast_slice(vertices));
        bytes.extend_from_slice(bytemuck::cast_slice(triangles));
        bytes
    }
}

/// Errors that can occur when decoding a [`GeometryCache`].
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GeometryCacheError {
    /// The buffer cannot even hold the header.
    #[error("Geometry cache of {len} bytes is too short to hold its header")]
    TooShort {
        /// Length of the buffer
        len: usize,
    },
    /// The buffer length disagrees with the counts in the header.
    #[error(
        "Geometry cache header declares {num_verts} vertices and {num_faces} faces ({expected} bytes), but the buffer holds {actual} bytes"
    )]
    LengthMismatch {
        /// Vertex count from the header
        num_verts: u32,
        /// Face count from the header
        num_faces: u32,
        /// Length implied by the header
        expected: u64,
        /// Actual length of the buffer
        actual: usize,
    },
    /// A triangle references a vertex past the end of the vertex array.
    #[error("Triangle {triangle} references vertex {index}, but the cache only has {num_verts} vertices")]
    IndexOutOfBounds {
        /// Index of the offending triangle
        triangle: usize,
        /// The out-of-bounds vertex index
        index: u32,
        /// Vertex count from the header
        num_verts: u32,
    },
}
