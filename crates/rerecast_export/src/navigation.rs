//! The navigation system as seen by the exporter: navigation data sets, the spatial index of
//! navigation-relevant elements, and the levels of the world.

use bitflags::bitflags;
use glam::Vec3;

use crate::{Aabb3d, AreaNavModifier, GeneratorConfig, InstanceTransform};

bitflags! {
    /// Properties of a [`NavigationElement`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
    pub struct ElementFlags: u8 {
        /// The element contributes collision geometry.
        const HAS_GEOMETRY = 1 << 0;
        /// The geometry of the element has not been gathered yet.
        const PENDING_LAZY_GEOMETRY = 1 << 1;
        /// The element can provide its geometry in slices, even while gathering is pending.
        const SUPPORTS_GEOMETRY_SLICES = 1 << 2;
    }
}

/// Anything registered with the navigation system that may affect the navmesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct NavigationElement {
    /// World-space bounds of the element
    pub bounds: Aabb3d,
    /// See [`ElementFlags`]
    pub flags: ElementFlags,
    /// Bitmask of the agents whose navmeshes use this element's geometry. Bit `i` is agent `i`.
    pub supported_agents: u32,
    /// The collision geometry, baked as a [`GeometryCache`](crate::GeometryCache). Empty if there is none.
    #[cfg_attr(feature = "serialize", serde(with = "base64_bytes"))]
    pub collision_data: Vec<u8>,
    /// Placements of the collision geometry and instanced areas.
    /// Empty if the element is placed exactly once, as-is.
    pub instance_transforms: Vec<InstanceTransform>,
    /// Area annotations of the element
    pub area_modifiers: Vec<AreaNavModifier>,
}

impl Default for NavigationElement {
    fn default() -> Self {
        Self {
            bounds: Aabb3d::default(),
            flags: ElementFlags::empty(),
            supported_agents: u32::MAX,
            collision_data: Vec::new(),
            instance_transforms: Vec::new(),
            area_modifiers: Vec::new(),
        }
    }
}

impl NavigationElement {
    /// Whether the element is flagged as having collision geometry.
    #[inline]
    pub fn has_geometry(&self) -> bool {
        self.flags.contains(ElementFlags::HAS_GEOMETRY)
    }

    /// Whether the navmesh of `nav_data` should be built from this element's geometry.
    pub fn should_use_geometry(&self, nav_data: &RecastNavData) -> bool {
        let agent_bit = 1_u32.checked_shl(nav_data.agent_index as u32).unwrap_or(0);
        let supports_agent = self.supported_agents & agent_bit != 0;
        let geometry_ready = !self.flags.contains(ElementFlags::PENDING_LAZY_GEOMETRY)
            || self.flags.contains(ElementFlags::SUPPORTS_GEOMETRY_SLICES);
        supports_agent && geometry_ready
    }

    /// The instance transforms that place `local_bounds` overlapping `bounds`.
    ///
    /// The placed box is tested, not the pivot, since instanced geometry is often offset from it.
    pub fn instance_transforms_overlapping(
        &self,
        bounds: &Aabb3d,
        local_bounds: &Aabb3d,
    ) -> Vec<InstanceTransform> {
        self.instance_transforms
            .iter()
            .filter(|transform| local_bounds.transformed(&transform.to_affine()).intersects(bounds))
            .copied()
            .collect()
    }
}

/// Yields the navigation elements overlapping a region.
///
/// The sequence is finite and consumed once per query.
pub trait SpatialIndex {
    /// Returns all elements whose bounds overlap `bounds`.
    fn elements_in(&self, bounds: &Aabb3d) -> impl Iterator<Item = &NavigationElement>;
}

/// A [`SpatialIndex`] that simply tests every element against the query.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(transparent))]
pub struct ElementList {
    /// The indexed elements
    pub elements: Vec<NavigationElement>,
}

impl From<Vec<NavigationElement>> for ElementList {
    fn from(elements: Vec<NavigationElement>) -> Self {
        Self { elements }
    }
}

impl SpatialIndex for ElementList {
    fn elements_in(&self, bounds: &Aabb3d) -> impl Iterator<Item = &NavigationElement> {
        self.elements
            .iter()
            .filter(move |element| element.bounds.intersects(bounds))
    }
}

/// A Recast navigation data set: one navmesh for one agent type.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct RecastNavData {
    /// Index of the agent this navmesh is built for, see [`NavigationElement::supported_agents`]
    pub agent_index: u8,
    /// The generator configuration of the navmesh
    pub config: GeneratorConfig,
}

/// One entry of [`NavigationSystem::nav_data_set`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum NavData {
    /// A navmesh built by Recast. Exported.
    Recast(RecastNavData),
    /// Any other kind of navigation data. Skipped.
    Other,
}

/// The navigation system of a world.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct NavigationSystem<I> {
    /// All navigation data sets, in registration order. The order determines the file names.
    pub nav_data_set: Vec<NavData>,
    /// The spatial index of navigation elements. `None` if it has not been created.
    pub spatial_index: Option<I>,
    /// The bounds of all navigable space
    pub total_bounds: Aabb3d,
}

/// A level of the world.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct Level {
    /// Pre-baked static navigable geometry as a vertex soup in host space.
    /// Every three consecutive points form one triangle.
    pub static_navigable_geometry: Option<Vec<Vec3>>,
}

/// The world holding the levels. Slots of unloaded levels are `None`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct World {
    /// All level slots
    pub levels: Vec<Option<Level>>,
}

#[cfg(feature = "serialize")]
mod base64_bytes {
    use base64::prelude::*;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&BASE64_STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        BASE64_STANDARD
            .decode(encoded)
            .map_err(serde::de::Error::custom)
    }
}
