//! The block of extra lines appended after the mesh: exported area volumes and the generator configuration,
//! in the format read by RecastDemo.

use std::fmt;

use crate::{Aabb3d, AreaExportEntry, AxisConvention, GeneratorConfig};

/// Formats the metadata block of one navigation data set.
///
/// Use [`ToString::to_string`] or `format!` to compose the block.
pub struct AdditionalData<'a, C> {
    /// The grown area volumes, in host space
    pub areas: &'a [AreaExportEntry],
    /// The bounds of all navigable space, in host space
    pub nav_bounds: Aabb3d,
    /// The configuration of the generator
    pub config: &'a GeneratorConfig,
    /// Used to convert area points and bounds into generator space
    pub convention: &'a C,
}

impl<C: AxisConvention> fmt::Display for AdditionalData<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.areas.is_empty() {
            writeln!(f, "# Area export")?;
            for entry in self.areas {
                write!(
                    f,
                    "\nAE {} {} {:.6} {:.6}\n",
                    entry.area.0,
                    entry.convex.points.len(),
                    entry.convex.min_z,
                    entry.convex.max_z
                )?;
                for point in &entry.convex.points {
                    let point = self.convention.to_generator_point(*point);
                    writeln!(f, "Av {:.6} {:.6} {:.6}", point.x, point.y, point.z)?;
                }
            }
            writeln!(f)?;
        }

        writeln!(f, "# RecastDemo specific data")?;
        let bounds = self.convention.to_generator_aabb(self.nav_bounds);
        writeln!(
            f,
            "rd_bbox {:7.7} {:7.7} {:7.7} {:7.7} {:7.7} {:7.7}",
            bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
        )?;

        let config = self.config;
        field(f, "AgentHeight", "agh", format_args!("{:5.5}", config.agent_height))?;
        field(f, "AgentRadius", "agr", format_args!("{:5.5}", config.agent_radius))?;

        field(f, "Cell Size", "cs", format_args!("{:5.5}", config.cell_size))?;
        field(f, "Cell Height", "ch", format_args!("{:5.5}", config.cell_height))?;

        field(f, "Agent max climb", "amc", config.agent_max_climb as i32)?;
        field(
            f,
            "Agent max slope",
            "ams",
            format_args!("{:5.5}", config.walkable_slope_angle),
        )?;

        field(f, "Region min size", "rmis", area_side(config.min_region_area))?;
        field(f, "Region merge size", "rmas", area_side(config.merge_region_area))?;

        field(f, "Max edge len", "mel", config.max_edge_len)?;

        field(
            f,
            "Perform Voxel Filtering",
            "pvf",
            u8::from(config.perform_voxel_filtering),
        )?;
        field(
            f,
            "Generate Detailed Mesh",
            "gdm",
            u8::from(config.generate_detailed_mesh),
        )?;
        field(f, "MaxPolysPerTile", "mppt", config.max_polys_per_tile)?;
        field(f, "maxVertsPerPoly", "mvpp", config.max_verts_per_poly)?;
        field(f, "Tile size", "ts", config.tile_size)?;

        writeln!(f)
    }
}

/// Writes a `# label` comment line followed by an `rd_tag value` line.
fn field(f: &mut fmt::Formatter<'_>, label: &str, tag: &str, value: impl fmt::Display) -> fmt::Result {
    writeln!(f, "# {label}")?;
    writeln!(f, "rd_{tag} {value}")
}

/// The side length of a square region covering `area` cells, rounded down.
fn area_side(area: u32) -> u32 {
    (area as f64).sqrt() as u32
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{AreaType, ConvexArea, GeneratorConfigBuilder, Identity, ZUpToYUp};

    fn config() -> GeneratorConfig {
        GeneratorConfigBuilder {
            cell_size: 0.25,
            cell_height: 0.125,
            agent_height: 1.5,
            agent_radius: 0.5,
            agent_max_climb: 0.75,
            agent_max_slope: 50.0,
            region_min_size: 3.0,
            region_merge_size: 5.0,
            edge_max_len: 3.0,
            verts_per_poly: 6,
            max_polys_per_tile: 1024,
            tile_size: 64,
            perform_voxel_filtering: false,
            generate_detailed_mesh: true,
        }
        .build()
    }

    fn bounds() -> Aabb3d {
        Aabb3d {
            min: Vec3::new(-1.0, -2.0, -3.0),
            max: Vec3::new(1.0, 2.0, 3.0),
        }
    }

    #[test]
    fn formats_configuration_without_areas() {
        let config = config();
        let text = AdditionalData {
            areas: &[],
            nav_bounds: bounds(),
            config: &config,
            convention: &Identity,
        }
        .to_string();

        let expected = "\
# RecastDemo specific data
rd_bbox -1.0000000 -2.0000000 -3.0000000 1.0000000 2.0000000 3.0000000
# AgentHeight
rd_agh 1.50000
# AgentRadius
rd_agr 0.50000
# Cell Size
rd_cs 0.25000
# Cell Height
rd_ch 0.12500
# Agent max climb
rd_amc 0
# Agent max slope
rd_ams 50.00000
# Region min size
rd_rmis 3
# Region merge size
rd_rmas 5
# Max edge len
rd_mel 12
# Perform Voxel Filtering
rd_pvf 0
# Generate Detailed Mesh
rd_gdm 1
# MaxPolysPerTile
rd_mppt 1024
# maxVertsPerPoly
rd_mvpp 6
# Tile size
rd_ts 64

";
        assert_eq!(text, expected);
    }

    #[test]
    fn area_block_precedes_configuration() {
        let config = config();
        let areas = [AreaExportEntry {
            area: AreaType(4),
            convex: ConvexArea {
                points: vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)],
                min_z: -0.5,
                max_z: 2.25,
            },
        }];
        let text = AdditionalData {
            areas: &areas,
            nav_bounds: bounds(),
            config: &config,
            convention: &ZUpToYUp,
        }
        .to_string();

        let expected_prologue = "\
# Area export

AE 4 2 -0.500000 2.250000
Av -1.000000 3.000000 -2.000000
Av -4.000000 6.000000 -5.000000

# RecastDemo specific data
rd_bbox -1.0000000 -3.0000000 -2.0000000 1.0000000 3.0000000 2.0000000
";
        assert!(text.starts_with(expected_prologue), "{text}");
    }

    #[test]
    fn region_sizes_are_rounded_down() {
        assert_eq!(area_side(64), 8);
        assert_eq!(area_side(63), 7);
        assert_eq!(area_side(0), 0);
    }
}
