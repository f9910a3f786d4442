//! # Scene Module
//!
//! Named starting layouts for a world. Each preset is a recipe over the bulk
//! builders in `generation`; presets are plain data so a configuration file can
//! choose one.

use cgmath::{Point3, Vector3};
use log::info;
use serde::{Deserialize, Serialize};

use super::block::{MaterialKind, Position};
use super::generation::PlaneExtents;
use super::registry::VoxelRegistry;

/// Starting layout of a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenePreset {
    /// Nothing at all.
    Empty,
    /// A grass floor, one strip of each building material, a tree and a pool.
    Showcase,
    /// Random cells scattered through a cube around the origin.
    ///
    /// Without a material each cell gets a random solid building block.
    RandomCube {
        /// Material of every cell, or a random solid one per cell.
        #[serde(default)]
        material: Option<MaterialKind>,
        /// Edge length of the cube.
        size: i32,
        /// Insertion attempts.
        count: usize,
    },
    /// The shell of a cube around the origin.
    HollowBox {
        /// Shell material.
        material: MaterialKind,
        /// Edge length of the cube.
        size: i32,
        /// Cells visited before giving up.
        max_blocks: usize,
    },
    /// A noise height field around the origin.
    Hills {
        /// Ground material.
        material: MaterialKind,
        /// Half-width of the square field.
        extent: i32,
        /// Highest column top above z = 0.
        amplitude: i32,
    },
}

impl Default for ScenePreset {
    fn default() -> Self {
        ScenePreset::Showcase
    }
}

const ORIGIN: Position = Point3 { x: 0, y: 0, z: 0 };

impl ScenePreset {
    /// Populates `registry` with this layout.
    ///
    /// # Arguments
    /// * `registry` - The registry to fill; existing blocks are kept
    /// * `rng` - Source for every random choice the layout makes
    pub fn build(&self, registry: &mut VoxelRegistry, rng: &mut fastrand::Rng) {
        match self {
            ScenePreset::Empty => {}
            ScenePreset::Showcase => build_showcase(registry, rng),
            ScenePreset::RandomCube {
                material,
                size,
                count,
            } => {
                registry.scatter_random(*material, *size, *count, rng);
            }
            ScenePreset::HollowBox {
                material,
                size,
                max_blocks,
            } => {
                registry.insert_hollow_box(*material, *size, *max_blocks);
            }
            ScenePreset::Hills {
                material,
                extent,
                amplitude,
            } => {
                registry.insert_hills(*material, *extent, *amplitude, rng);
            }
        }
        info!("Built scene {:?}: {} blocks", self, registry.block_count());
    }
}

fn build_showcase(registry: &mut VoxelRegistry, rng: &mut fastrand::Rng) {
    let up = Vector3::unit_z();
    let right = Vector3::unit_y();
    let forward = Vector3::unit_x();

    registry.insert_plane(ORIGIN, MaterialKind::Grass, PlaneExtents::square(10));

    let strips = [
        MaterialKind::Wood,
        MaterialKind::Leaf,
        MaterialKind::Glass,
        MaterialKind::Sand,
        MaterialKind::Stone,
    ];
    for (offset, material) in (0..).zip(strips) {
        registry.insert_plane(ORIGIN + up + right * offset, material, PlaneExtents::along_x(5, 5));
    }

    registry.insert_tree(ORIGIN + right * 8, 7, rng);
    registry.insert_water_box(
        ORIGIN + right * -8 + forward * -3 + up,
        ORIGIN + right * -5 + forward * 3 + up * 4,
    );
}
