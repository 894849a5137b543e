//! Area annotations: the convex volumes that mark parts of the navmesh with a specific [`AreaType`].

use glam::Vec3;

use crate::{Aabb3d, InstanceTransform};

/// Identifier of a navigation area, written verbatim into the `AE` lines of the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaType(pub u8);

impl From<u8> for AreaType {
    fn from(value: u8) -> Self {
        AreaType(value)
    }
}

/// A prism in host space: a polygon on the horizontal plane, extruded between two heights.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ConvexArea {
    /// The outline of the volume, in order.
    pub points: Vec<Vec3>,
    /// The lower bound of the volume along the vertical axis
    pub min_z: f32,
    /// The upper bound of the volume along the vertical axis
    pub max_z: f32,
}

impl ConvexArea {
    /// The box enclosing the whole prism. `None` if there are no points.
    pub fn bounds(&self) -> Option<Aabb3d> {
        Aabb3d::from_verts(self.points.iter().flat_map(|p| {
            [
                Vec3::new(p.x, p.y, self.min_z),
                Vec3::new(p.x, p.y, self.max_z),
            ]
        }))
    }
}

/// The shape of an [`AreaNavModifier`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum NavigationShape {
    /// A single convex volume in world space.
    Convex(ConvexArea),
    /// A convex volume in local space, placed once per instance transform of its element.
    InstancedConvex(ConvexArea),
    /// Any other shape. Not exported.
    Other,
}

/// Marks the space covered by its shape with an area type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaNavModifier {
    /// The area type applied inside the shape
    pub area: AreaType,
    /// The covered space
    pub shape: NavigationShape,
}

impl AreaNavModifier {
    /// Returns the world-space convex volume of a [`NavigationShape::Convex`] modifier.
    pub fn convex(&self) -> Option<&ConvexArea> {
        match &self.shape {
            NavigationShape::Convex(convex) => Some(convex),
            _ => None,
        }
    }

    /// Places the local volume of a [`NavigationShape::InstancedConvex`] modifier with `transform`.
    ///
    /// The vertical bounds are recomputed from the transformed prism,
    /// so rotated or scaled instances still cover their full height.
    pub fn per_instance_convex(&self, transform: &InstanceTransform) -> Option<ConvexArea> {
        let NavigationShape::InstancedConvex(local) = &self.shape else {
            return None;
        };
        let affine = transform.to_affine();
        let points = local
            .points
            .iter()
            .map(|p| affine.transform_point3(*p))
            .collect();
        let (min_z, max_z) = local
            .points
            .iter()
            .flat_map(|p| {
                [
                    Vec3::new(p.x, p.y, local.min_z),
                    Vec3::new(p.x, p.y, local.max_z),
                ]
            })
            .map(|p| affine.transform_point3(p).z)
            .fold((f32::MAX, f32::MIN), |(min, max), z| {
                (min.min(z), max.max(z))
            });
        Some(ConvexArea {
            points,
            min_z,
            max_z,
        })
    }
}

/// One inflated area volume, ready to be written as an `AE` block.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct AreaExportEntry {
    /// The area type of the volume
    pub area: AreaType,
    /// The inflated volume, in host space
    pub convex: ConvexArea,
}
