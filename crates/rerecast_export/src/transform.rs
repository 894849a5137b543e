//! Placement of instanced geometry and areas, in host space.

use glam::{Affine3A, Quat, Vec3};

/// The placement of one instance of a shared geometry template, in host space.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct InstanceTransform {
    /// Position of the instance
    pub translation: Vec3,
    /// Rotation of the instance
    pub rotation: Quat,
    /// Non-uniform scale of the instance
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl InstanceTransform {
    /// The transform that leaves every point in place.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Creates a transform that only translates.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// The affine matrix applying scale, then rotation, then translation.
    #[inline]
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn applies_scale_rotation_translation_in_order() {
        let transform = InstanceTransform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::from_rotation_z(FRAC_PI_2),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        let p = transform.to_affine().transform_point3(Vec3::X);
        assert_relative_eq!(p.x, 10.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn identity_is_default() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(InstanceTransform::default().to_affine().transform_point3(p), p);
    }
}
