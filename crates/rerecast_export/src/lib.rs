#![doc = include_str!("../../../readme.md")]

mod area;
mod collector;
mod config;
mod convert;
mod export;
mod geometry_cache;
mod grow_convex_hull;
pub(crate) mod math;
mod metadata;
mod navigation;
mod obj;
mod transform;
mod trimesh;
mod vertex_soup;

pub use area::{AreaExportEntry, AreaNavModifier, AreaType, ConvexArea, NavigationShape};
pub use collector::{CollectedGeometry, GeometryCollector};
pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use convert::{AxisConvention, Identity, ZUpToYUp};
pub use export::{
    ExportError, ExportOptions, ExportSummary, SkipReason, SkippedDataSet, TIMESTAMP_FORMAT,
    capture_timestamp, data_set_file_name, export_navigation_data,
};
pub use geometry_cache::{GeometryCache, GeometryCacheError, GeometryCacheHeader};
pub use grow_convex_hull::grow_convex_hull;
pub use math::Aabb3d;
pub use metadata::AdditionalData;
pub use navigation::{
    ElementFlags, ElementList, Level, NavData, NavigationElement, NavigationSystem,
    RecastNavData, SpatialIndex, World,
};
pub use obj::{ObjExportError, export_geom_to_obj_file, write_obj};
pub use transform::InstanceTransform;
pub use trimesh::TriMesh;
pub use vertex_soup::transform_vertex_soup;
