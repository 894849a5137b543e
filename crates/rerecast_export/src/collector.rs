//! Gathers everything one navigation data set is built from into a single [`TriMesh`]
//! and a list of [`AreaExportEntry`]s.

use crate::{
    Aabb3d, AreaExportEntry, AreaType, AxisConvention, ConvexArea, GeometryCache,
    GeometryCacheError, InstanceTransform, Level, NavigationElement, NavigationShape,
    RecastNavData, SpatialIndex, TriMesh, World, grow_convex_hull, transform_vertex_soup,
};

/// The input of one navigation data set, ready to be written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollectedGeometry {
    /// All solid geometry, in generator space
    pub mesh: TriMesh,
    /// All grown area volumes, in host space
    pub areas: Vec<AreaExportEntry>,
}

/// Accumulates geometry and area volumes for one navigation data set.
///
/// Geometry is always appended to the mesh together with its triangles, which are rebased onto
/// the vertices already collected, so the mesh stays consistent no matter the order of sources.
#[derive(Debug)]
pub struct GeometryCollector<'a, C> {
    nav_data: &'a RecastNavData,
    convention: &'a C,
    collected: CollectedGeometry,
}

impl<'a, C: AxisConvention> GeometryCollector<'a, C> {
    /// Creates an empty collector for `nav_data`.
    pub fn new(nav_data: &'a RecastNavData, convention: &'a C) -> Self {
        Self {
            nav_data,
            convention,
            collected: CollectedGeometry::default(),
        }
    }

    /// Collects every element of `spatial_index` within `bounds` and the static geometry of every level of `world`.
    pub fn collect(
        nav_data: &'a RecastNavData,
        convention: &'a C,
        spatial_index: &impl SpatialIndex,
        bounds: &Aabb3d,
        world: &World,
    ) -> Result<CollectedGeometry, GeometryCacheError> {
        let mut collector = Self::new(nav_data, convention);
        for element in spatial_index.elements_in(bounds) {
            collector.collect_element(element)?;
        }
        collector.collect_world(world);
        Ok(collector.finish())
    }

    /// Adds an element, either as solid geometry or as area volumes, never both.
    ///
    /// An element without instance transforms is placed once, as-is. Otherwise every instance whose
    /// placed geometry overlaps the element's bounds gets its own copy.
    pub fn collect_element(&mut self, element: &NavigationElement) -> Result<(), GeometryCacheError> {
        let export_geometry = element.has_geometry() && element.should_use_geometry(self.nav_data);
        if export_geometry && !element.collision_data.is_empty() {
            let cache = GeometryCache::decode(&element.collision_data)?;
            if element.instance_transforms.is_empty() {
                self.append_cache(&cache, &[]);
                return Ok(());
            }
            let convention = self.convention;
            let Some(local_bounds) =
                Aabb3d::from_verts(cache.vertices().map(|v| convention.to_host_point(v)))
            else {
                return Ok(());
            };
            let instance_transforms =
                element.instance_transforms_overlapping(&element.bounds, &local_bounds);
            tracing::trace!(
                "Collecting geometry with {} of {} instances",
                instance_transforms.len(),
                element.instance_transforms.len()
            );
            // Instances outside the bounds are skipped, never replaced by the bare template.
            if !instance_transforms.is_empty() {
                self.append_cache(&cache, &instance_transforms);
            }
            Ok(())
        } else {
            self.collect_areas(element);
            Ok(())
        }
    }

    /// Decodes a geometry cache and appends it once per instance, or once as-is without instances.
    pub fn collect_geometry_cache(
        &mut self,
        collision_data: &[u8],
        instance_transforms: &[InstanceTransform],
    ) -> Result<(), GeometryCacheError> {
        let cache = GeometryCache::decode(collision_data)?;
        self.append_cache(&cache, instance_transforms);
        Ok(())
    }

    fn append_cache(&mut self, cache: &GeometryCache<'_>, instance_transforms: &[InstanceTransform]) {
        let instance_count = instance_transforms.len().max(1);
        let mesh = &mut self.collected.mesh;
        mesh.reserve(
            cache.vertex_count() * instance_count,
            cache.face_count() * instance_count,
        );

        if instance_transforms.is_empty() {
            mesh.append(cache.triangles(), cache.vertices());
        }
        let convention = self.convention;
        for transform in instance_transforms {
            // The cache is in generator space, but instances are placed in host space.
            let local_to_world = transform.to_affine();
            mesh.append(
                cache.triangles(),
                cache.vertices().map(|vertex| {
                    let host = local_to_world.transform_point3(convention.to_host_point(vertex));
                    convention.to_generator_point(host)
                }),
            );
        }
    }

    fn collect_areas(&mut self, element: &NavigationElement) {
        for modifier in &element.area_modifiers {
            match &modifier.shape {
                NavigationShape::Convex(convex) => self.add_area(modifier.area, convex),
                NavigationShape::InstancedConvex(local) => {
                    let Some(local_bounds) = local.bounds() else {
                        continue;
                    };
                    for transform in
                        element.instance_transforms_overlapping(&element.bounds, &local_bounds)
                    {
                        if let Some(convex) = modifier.per_instance_convex(&transform) {
                            self.add_area(modifier.area, &convex);
                        }
                    }
                }
                NavigationShape::Other => {}
            }
        }
    }

    /// Grows `convex` by the agent radius and records it, unless it is degenerate.
    pub fn add_area(&mut self, area: AreaType, convex: &ConvexArea) {
        let config = &self.nav_data.config;
        let points = grow_convex_hull(config.agent_radius, &convex.points);
        if points.is_empty() {
            tracing::debug!(
                "Skipping degenerate area volume with {} points",
                convex.points.len()
            );
            return;
        }
        self.collected.areas.push(AreaExportEntry {
            area,
            convex: ConvexArea {
                points,
                min_z: convex.min_z - config.cell_height,
                max_z: convex.max_z + config.cell_height,
            },
        });
    }

    /// Adds the static navigable geometry of all loaded levels.
    pub fn collect_world(&mut self, world: &World) {
        for level in world.levels.iter().flatten() {
            self.collect_level(level);
        }
    }

    /// Adds the static navigable geometry of a level, if it has any.
    pub fn collect_level(&mut self, level: &Level) {
        let Some(vertex_soup) = &level.static_navigable_geometry else {
            return;
        };
        if vertex_soup.is_empty() {
            return;
        }
        let mesh = transform_vertex_soup(vertex_soup, self.convention);
        self.collected.mesh.extend(mesh);
    }

    /// Consumes the collector, returning everything it collected.
    pub fn finish(self) -> CollectedGeometry {
        tracing::debug!(
            "Collected {} vertices, {} triangles and {} area volumes",
            self.collected.mesh.vertex_count(),
            self.collected.mesh.triangle_count(),
            self.collected.areas.len()
        );
        self.collected
    }
}
