//! Exports every Recast navigation data set of a navigation system into its own OBJ file.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    time::Instant,
};

use thiserror::Error;

use crate::{
    AdditionalData, AxisConvention, GeometryCacheError, GeometryCollector, NavData,
    NavigationSystem, ObjExportError, SpatialIndex, World, export_geom_to_obj_file,
};

/// The format of the capture timestamp in file names, e.g. `2024.05.17-13.37.00`.
pub const TIMESTAMP_FORMAT: &str = "%Y.%m.%d-%H.%M.%S";

/// Where to write the exported files.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportOptions {
    /// Prefix of every file name, possibly including directories.
    pub base_name: PathBuf,
    /// The capture timestamp used in file names. Captured from the local clock when `None`.
    pub timestamp: Option<String>,
}

impl ExportOptions {
    /// Exports to files starting with `base_name`, stamped with the time of the export.
    pub fn new(base_name: impl Into<PathBuf>) -> Self {
        Self {
            base_name: base_name.into(),
            timestamp: None,
        }
    }

    /// Uses a fixed timestamp instead of the time of the export.
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// The current local time, formatted with [`TIMESTAMP_FORMAT`].
pub fn capture_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// The file name of the data set at `index`: `{base_name}_NavDataSet{index}_{timestamp}.obj`.
pub fn data_set_file_name(base_name: &Path, index: usize, timestamp: &str) -> PathBuf {
    let mut name = OsString::from(base_name.as_os_str());
    name.push(format!("_NavDataSet{index}_{timestamp}.obj"));
    PathBuf::from(name)
}

/// What an export produced.
#[derive(Debug, Default)]
pub struct ExportSummary {
    /// The files that were written, in data set order
    pub written: Vec<PathBuf>,
    /// The data sets that could not be exported
    pub skipped: Vec<SkippedDataSet>,
}

/// A Recast data set that was not exported.
#[derive(Debug)]
pub struct SkippedDataSet {
    /// Index of the data set in [`NavigationSystem::nav_data_set`]
    pub index: usize,
    /// Why the data set was skipped
    pub reason: SkipReason,
}

/// Why a data set was skipped. Neither reason affects the other data sets.
#[derive(Error, Debug)]
pub enum SkipReason {
    /// An element of the data set carried a malformed geometry cache.
    #[error(transparent)]
    MalformedGeometry(#[from] GeometryCacheError),
    /// The file could not be written.
    #[error(transparent)]
    Write(#[from] ObjExportError),
}

/// Errors that abort an export before anything is written.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    /// There is no navigation system to export from.
    #[error("Failed to export navigation data due to NavigationSystem being missing")]
    MissingNavigationSystem,
    /// The navigation system has no spatial index to query elements from.
    #[error("Failed to export navigation data due to the spatial index being missing")]
    MissingSpatialIndex,
}

/// Exports every Recast data set of `navigation` together with the static geometry of `world`.
///
/// Each data set gets its own file, see [`data_set_file_name`]. A data set whose geometry is malformed
/// or whose file cannot be written is skipped and reported in the [`ExportSummary`]; the others are
/// still exported. Non-Recast data sets are ignored.
pub fn export_navigation_data<I: SpatialIndex, C: AxisConvention>(
    navigation: Option<&NavigationSystem<I>>,
    world: &World,
    convention: &C,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let Some(navigation) = navigation else {
        return Err(log_error(ExportError::MissingNavigationSystem));
    };
    let Some(spatial_index) = navigation.spatial_index.as_ref() else {
        return Err(log_error(ExportError::MissingSpatialIndex));
    };

    let start = Instant::now();
    let timestamp = options
        .timestamp
        .clone()
        .unwrap_or_else(capture_timestamp);

    let mut summary = ExportSummary::default();
    for (index, nav_data) in navigation.nav_data_set.iter().enumerate() {
        let NavData::Recast(nav_data) = nav_data else {
            tracing::debug!("Skipping navigation data set {index}: not a Recast navmesh");
            continue;
        };

        let collected = match GeometryCollector::collect(
            nav_data,
            convention,
            spatial_index,
            &navigation.total_bounds,
            world,
        ) {
            Ok(collected) => collected,
            Err(err) => {
                tracing::error!("Skipping navigation data set {index}: {err}");
                summary.skipped.push(SkippedDataSet {
                    index,
                    reason: err.into(),
                });
                continue;
            }
        };

        let additional_data = AdditionalData {
            areas: &collected.areas,
            nav_bounds: navigation.total_bounds,
            config: &nav_data.config,
            convention,
        }
        .to_string();

        let path = data_set_file_name(&options.base_name, index, &timestamp);
        match export_geom_to_obj_file(&path, &collected.mesh, &additional_data) {
            Ok(()) => {
                tracing::debug!("Exported navigation data set {index} to {}", path.display());
                summary.written.push(path);
            }
            Err(err) => {
                tracing::warn!("Skipping navigation data set {index}: {err}");
                summary.skipped.push(SkippedDataSet {
                    index,
                    reason: err.into(),
                });
            }
        }
    }

    tracing::info!(
        "ExportNavigation time: {:.3} sec.",
        start.elapsed().as_secs_f64()
    );
    Ok(summary)
}

fn log_error(err: ExportError) -> ExportError {
    tracing::error!("{err}");
    err
}

#[cfg(test)]
mod tests {
    use glam::{UVec3, Vec3};

    use super::*;
    use crate::{
        Aabb3d, ElementFlags, ElementList, GeometryCache, Identity, Level, NavigationElement,
        RecastNavData,
    };

    fn navigation(elements: Vec<NavigationElement>) -> NavigationSystem<ElementList> {
        NavigationSystem {
            nav_data_set: vec![
                NavData::Recast(RecastNavData::default()),
                NavData::Other,
                NavData::Recast(RecastNavData::default()),
            ],
            spatial_index: Some(ElementList::from(elements)),
            total_bounds: Aabb3d::new(Vec3::ZERO, Vec3::splat(50.0)),
        }
    }

    fn geometry_element(collision_data: Vec<u8>) -> NavigationElement {
        NavigationElement {
            bounds: Aabb3d::new(Vec3::ZERO, Vec3::ONE),
            flags: ElementFlags::HAS_GEOMETRY,
            collision_data,
            ..Default::default()
        }
    }

    #[test]
    fn file_name_contains_index_and_timestamp() {
        assert_eq!(
            data_set_file_name(Path::new("out/level"), 2, "2024.01.02-03.04.05"),
            PathBuf::from("out/level_NavDataSet2_2024.01.02-03.04.05.obj")
        );
    }

    #[test]
    fn timestamp_has_expected_shape() {
        let timestamp = capture_timestamp();
        assert_eq!(timestamp.len(), "2024.01.02-03.04.05".len());
        assert_eq!(&timestamp[4..5], ".");
        assert_eq!(&timestamp[10..11], "-");
    }

    #[test]
    fn missing_navigation_system_aborts() {
        let result = export_navigation_data::<ElementList, _>(
            None,
            &World::default(),
            &Identity,
            &ExportOptions::new("unused"),
        );
        assert_eq!(result.unwrap_err(), ExportError::MissingNavigationSystem);
    }

    #[test]
    fn missing_spatial_index_aborts_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut navigation = navigation(Vec::new());
        navigation.spatial_index = None;
        let result = export_navigation_data(
            Some(&navigation),
            &World::default(),
            &Identity,
            &ExportOptions::new(dir.path().join("nav")),
        );
        assert_eq!(result.unwrap_err(), ExportError::MissingSpatialIndex);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn writes_one_file_per_recast_data_set() {
        let dir = tempfile::tempdir().unwrap();
        let cache = GeometryCache::encode(&[Vec3::ZERO, Vec3::X, Vec3::Z], &[UVec3::new(0, 1, 2)]);
        let world = World {
            levels: vec![Some(Level {
                static_navigable_geometry: Some(vec![Vec3::ZERO, Vec3::X, Vec3::Y]),
            })],
        };
        let summary = export_navigation_data(
            Some(&navigation(vec![geometry_element(cache)])),
            &world,
            &Identity,
            &ExportOptions::new(dir.path().join("nav")).with_timestamp("now"),
        )
        .unwrap();

        assert!(summary.skipped.is_empty());
        assert_eq!(
            summary.written,
            vec![
                dir.path().join("nav_NavDataSet0_now.obj"),
                dir.path().join("nav_NavDataSet2_now.obj"),
            ]
        );
        let text = std::fs::read_to_string(&summary.written[0]).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with("v ")).count(), 6);
        assert!(text.contains("f 1 2 3 \nf 6 5 4 \n"));
        assert!(text.contains("# RecastDemo specific data\n"));
        assert!(!text.contains("# Area export"));
    }

    #[test]
    fn malformed_geometry_skips_only_affected_data_sets() {
        let dir = tempfile::tempdir().unwrap();
        let mut navigation = navigation(vec![geometry_element(vec![1, 2, 3])]);
        // The second Recast data set does not use the element's geometry.
        navigation.nav_data_set[2] = NavData::Recast(RecastNavData {
            agent_index: 1,
            ..Default::default()
        });
        if let Some(index) = navigation.spatial_index.as_mut() {
            index.elements[0].supported_agents = 0b1;
        }

        let summary = export_navigation_data(
            Some(&navigation),
            &World::default(),
            &Identity,
            &ExportOptions::new(dir.path().join("nav")).with_timestamp("now"),
        )
        .unwrap();

        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.skipped[0].index, 0);
        assert!(matches!(
            summary.skipped[0].reason,
            SkipReason::MalformedGeometry(GeometryCacheError::TooShort { len: 3 })
        ));
        assert_eq!(summary.written, vec![dir.path().join("nav_NavDataSet2_now.obj")]);
    }

    #[test]
    fn unwritable_destination_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let summary = export_navigation_data(
            Some(&navigation(Vec::new())),
            &World::default(),
            &Identity,
            &ExportOptions::new(dir.path().join("missing").join("nav")),
        )
        .unwrap();
        assert!(summary.written.is_empty());
        assert_eq!(summary.skipped.len(), 2);
        assert!(matches!(summary.skipped[1].reason, SkipReason::Write(_)));
    }
}
