/// The build configuration of the navmesh generator that will consume the export.
/// Usually built using [`GeneratorConfigBuilder`].
///
/// The exporter only reads this configuration, to write it into the metadata block of the file
/// and to size the area volumes. It does not build anything with it.
///
/// Units are either voxels (vx) or world units (wu). Voxel sizes are defined by
/// [`cell_size`](Self::cell_size) and [`cell_height`](Self::cell_height).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// The height of the agent. `[Limit: > 0] [Units: wu]`
    pub agent_height: f32,

    /// The radius of the agent. `[Limit: > 0] [Units: wu]`
    ///
    /// Area volumes are grown by this distance before they are exported.
    pub agent_radius: f32,

    /// The xz-plane cell size to use for fields. `[Limit: > 0] [Units: wu]`
    ///
    /// A recommended starting value is either r/2 or r/3, with r being the agent radius.
    pub cell_size: f32,

    /// The y-axis cell size to use for fields. `[Limit: > 0] [Units: wu]`
    ///
    /// A good starting point is half the cell size.
    /// Area volumes are extended by this distance up and down before they are exported.
    pub cell_height: f32,

    /// Maximum ledge height that is considered to still be traversable. `[Limit: >=0] [Units: wu]`
    pub agent_max_climb: f32,

    /// The maximum slope that is considered walkable. `[Limits: 0 <= value < 90] [Units: Degrees]`
    pub walkable_slope_angle: f32,

    /// The minimum number of cells allowed to form isolated island areas. `[Limit: >=0] [Units: vx]`
    ///
    /// Exported as its square root, which is the region size the generator expects as input.
    pub min_region_area: u32,

    /// Any regions with a span count smaller than this value will, if possible,
    /// be merged with larger regions. `[Limit: >=0] [Units: vx]`
    ///
    /// Exported as its square root.
    pub merge_region_area: u32,

    /// The maximum allowed length for contour edges along the border of the mesh. `[Limit: >=0] [Units: vx]`
    pub max_edge_len: u32,

    /// Whether the generator filters the voxel field before building regions.
    pub perform_voxel_filtering: bool,

    /// Whether the generator builds a detail mesh.
    pub generate_detailed_mesh: bool,

    /// The maximum number of polygons a single tile may hold.
    pub max_polys_per_tile: u32,

    /// The maximum number of vertices allowed for polygons generated during the
    /// contour to polygon conversion process. `[Limit: >= 3]`
    pub max_verts_per_poly: u32,

    /// The width/height size of tiles on the xz-plane. `[Limit: >= 0] [Units: vx]`
    pub tile_size: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfigBuilder::default().build()
    }
}

/// A builder for [`GeneratorConfig`]. Sizes are given in world units and converted to voxels on build.
/// The default values are chosen to be reasonable for an agent resembling an adult human.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serialize", serde(default))]
pub struct GeneratorConfigBuilder {
    /// See [`GeneratorConfig::cell_size`]
    pub cell_size: f32,
    /// See [`GeneratorConfig::cell_height`]
    pub cell_height: f32,
    /// See [`GeneratorConfig::agent_height`]
    pub agent_height: f32,
    /// See [`GeneratorConfig::agent_radius`]
    pub agent_radius: f32,
    /// See [`GeneratorConfig::agent_max_climb`]
    pub agent_max_climb: f32,
    /// See [`GeneratorConfig::walkable_slope_angle`]. `[Units: Degrees]`
    pub agent_max_slope: f32,
    /// The side length of the smallest region that is kept. `[Units: vx]`
    pub region_min_size: f32,
    /// The side length below which regions are merged. `[Units: vx]`
    pub region_merge_size: f32,
    /// The maximum contour edge length. `[Units: wu]`
    pub edge_max_len: f32,
    /// See [`GeneratorConfig::max_verts_per_poly`]
    pub verts_per_poly: u32,
    /// See [`GeneratorConfig::max_polys_per_tile`]
    pub max_polys_per_tile: u32,
    /// See [`GeneratorConfig::tile_size`]
    pub tile_size: u32,
    /// See [`GeneratorConfig::perform_voxel_filtering`]
    pub perform_voxel_filtering: bool,
    /// See [`GeneratorConfig::generate_detailed_mesh`]
    pub generate_detailed_mesh: bool,
}

impl Default for GeneratorConfigBuilder {
    fn default() -> Self {
        Self {
            cell_size: 0.3,
            cell_height: 0.2,
            agent_height: 2.0,
            agent_radius: 0.6,
            agent_max_climb: 0.9,
            agent_max_slope: 45.0,
            region_min_size: 8.0,
            region_merge_size: 20.0,
            edge_max_len: 12.0,
            verts_per_poly: 6,
            max_polys_per_tile: 4096,
            tile_size: 32,
            perform_voxel_filtering: true,
            generate_detailed_mesh: true,
        }
    }
}

impl GeneratorConfigBuilder {
    /// Builds a [`GeneratorConfig`] from the current configuration.
    pub fn build(self) -> GeneratorConfig {
        GeneratorConfig {
            agent_height: self.agent_height,
            agent_radius: self.agent_radius,
            cell_size: self.cell_size,
            cell_height: self.cell_height,
            agent_max_climb: self.agent_max_climb,
            walkable_slope_angle: self.agent_max_slope,
            min_region_area: (self.region_min_size * self.region_min_size) as u32,
            merge_region_area: (self.region_merge_size * self.region_merge_size) as u32,
            max_edge_len: (self.edge_max_len / self.cell_size) as u32,
            perform_voxel_filtering: self.perform_voxel_filtering,
            generate_detailed_mesh: self.generate_detailed_mesh,
            max_polys_per_tile: self.max_polys_per_tile,
            max_verts_per_poly: self.verts_per_poly,
            tile_size: self.tile_size,
        }
    }
}
