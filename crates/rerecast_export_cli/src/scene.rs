use std::{fs, path::Path};

use anyhow::{Context as _, Result};
use rerecast_export::{ElementList, NavigationSystem, World};
use serde::Deserialize;

/// Everything an export reads, as stored on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct SceneDescription {
    /// The navigation system to export. Exporting fails when it is missing.
    #[serde(default)]
    pub(crate) navigation: Option<NavigationSystem<ElementList>>,
    #[serde(default)]
    pub(crate) world: World,
}

impl SceneDescription {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse scene {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_minimal_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(
            &path,
            r#"{
                "navigation": {
                    "nav_data_set": [{ "Recast": { "agent_index": 0 } }, "Other"],
                    "spatial_index": [{ "flags": "HAS_GEOMETRY", "collision_data": "" }],
                    "total_bounds": { "min": [-10.0, -10.0, -10.0], "max": [10.0, 10.0, 10.0] }
                },
                "world": { "levels": [null, { "static_navigable_geometry": null }] }
            }"#,
        )
        .unwrap();

        let scene = SceneDescription::load(&path).unwrap();
        let navigation = scene.navigation.unwrap();
        assert_eq!(navigation.nav_data_set.len(), 2);
        assert_eq!(navigation.spatial_index.unwrap().elements.len(), 1);
        assert_eq!(scene.world.levels.len(), 2);
    }

    #[test]
    fn scene_without_navigation_loads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        fs::write(&path, "{}").unwrap();
        let scene = SceneDescription::load(&path).unwrap();
        assert!(scene.navigation.is_none());
        assert!(scene.world.levels.is_empty());
    }

    #[test]
    fn missing_file_names_path() {
        let err = SceneDescription::load(Path::new("does/not/exist.json")).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
