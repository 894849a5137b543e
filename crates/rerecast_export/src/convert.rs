//! Conversion between the host engine's axis convention and the generator's.
//!
//! The host engine is Z-up, while Recast expects Y-up with the handedness flipped.
//! Everything handed to the OBJ writer is in generator space.

use glam::Vec3;

use crate::Aabb3d;

/// A pair of pure functions mapping points between host space and generator space.
pub trait AxisConvention {
    /// Maps a host-space point into generator space.
    fn to_generator_point(&self, point: Vec3) -> Vec3;

    /// Maps a generator-space point back into host space.
    fn to_host_point(&self, point: Vec3) -> Vec3;

    /// Maps a host-space box into generator space.
    /// Both corners are converted and the box is re-normalized, since the conversion may flip axes.
    fn to_generator_aabb(&self, aabb: Aabb3d) -> Aabb3d {
        let a = self.to_generator_point(aabb.min);
        let b = self.to_generator_point(aabb.max);
        Aabb3d {
            min: a.min(b),
            max: a.max(b),
        }
    }
}

/// Z-up host space to Y-up generator space: `(x, y, z) -> (-x, z, -y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ZUpToYUp;

impl AxisConvention for ZUpToYUp {
    #[inline]
    fn to_generator_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(-point.x, point.z, -point.y)
    }

    #[inline]
    fn to_host_point(&self, point: Vec3) -> Vec3 {
        Vec3::new(-point.x, -point.z, point.y)
    }
}

/// Host and generator share the same axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity;

impl AxisConvention for Identity {
    #[inline]
    fn to_generator_point(&self, point: Vec3) -> Vec3 {
        point
    }

    #[inline]
    fn to_host_point(&self, point: Vec3) -> Vec3 {
        point
    }
}
