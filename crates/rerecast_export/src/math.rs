//! Bounding boxes and the few vector helpers that work on the horizontal (XY) plane.

use glam::{Affine3A, Vec3};

/// An axis-aligned bounding box in 3D space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb3d {
    /// The minimum point of the box
    pub min: Vec3,
    /// The maximum point of the box
    pub max: Vec3,
}

impl Aabb3d {
    /// Creates a new AABB from a center point and half-extents.
    #[inline]
    pub fn new(center: impl Into<Vec3>, half_size: impl Into<Vec3>) -> Self {
        let center = center.into();
        let half_size = half_size.into();
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Computes the AABB of a set of vertices.
    /// Returns `None` if the set is empty.
    pub fn from_verts(verts: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = verts.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), point| {
            (point.min(min), point.max(max))
        });
        Some(Self { min, max })
    }

    /// The AABB enclosing this box after it has been moved by `affine`.
    pub fn transformed(&self, affine: &Affine3A) -> Self {
        let corners = (0..8).map(|i| {
            let corner = Vec3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            );
            affine.transform_point3(corner)
        });
        // Eight corners, never empty.
        Self::from_verts(corners).unwrap_or(*self)
    }

    /// Whether the two boxes overlap. Touching boxes count as overlapping.
    #[inline]
    pub fn intersects(&self, other: &Aabb3d) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

/// Rotates a vector by 90 degrees around the vertical (Z) axis.
#[inline]
pub(crate) fn rotate_z_90(v: Vec3) -> Vec3 {
    Vec3::new(-v.y, v.x, v.z)
}

/// Rotates a vector by -90 degrees around the vertical (Z) axis.
#[inline]
pub(crate) fn rotate_z_neg_90(v: Vec3) -> Vec3 {
    Vec3::new(v.y, -v.x, v.z)
}

/// Normalizes the horizontal part of a vector, dropping its vertical component.
/// Returns zero for vectors without horizontal extent.
#[inline]
pub(crate) fn normalize_2d_or_zero(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0).normalize_or_zero()
}

/// Squared length of the horizontal part of a vector.
#[inline]
pub(crate) fn length_squared_2d(v: Vec3) -> f32 {
    v.x * v.x + v.y * v.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_verts_covers_all_points() {
        let aabb = Aabb3d::from_verts([
            Vec3::new(1.0, -2.0, 3.0),
            Vec3::new(-1.0, 4.0, 0.0),
            Vec3::new(0.5, 0.0, 7.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 4.0, 7.0));
    }

    #[test]
    fn aabb_from_no_verts_is_none() {
        assert_eq!(Aabb3d::from_verts(Vec::new()), None);
    }

    #[test]
    fn transformed_box_encloses_rotated_corners() {
        let aabb = Aabb3d {
            min: Vec3::new(5.0, 0.0, 0.0),
            max: Vec3::new(6.0, 1.0, 0.0),
        };
        let rotated = aabb.transformed(&Affine3A::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!((rotated.min - Vec3::new(-1.0, 5.0, 0.0)).length() < 1e-5);
        assert!((rotated.max - Vec3::new(0.0, 6.0, 0.0)).length() < 1e-5);

        let moved = aabb.transformed(&Affine3A::from_translation(Vec3::Z));
        assert_eq!(moved.min, Vec3::new(5.0, 0.0, 1.0));
        assert_eq!(moved.max, Vec3::new(6.0, 1.0, 1.0));
    }

    #[test]
    fn touching_boxes_intersect() {
        let a = Aabb3d::new(Vec3::ZERO, [1.0, 1.0, 1.0]);
        let b = Aabb3d::new([2.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        let c = Aabb3d::new([3.5, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn rotations_are_inverse() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(rotate_z_90(v), Vec3::new(-2.0, 1.0, 3.0));
        assert_eq!(rotate_z_neg_90(rotate_z_90(v)), v);
    }
}
