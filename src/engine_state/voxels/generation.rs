//! # Generation Module
//!
//! Bulk builders that populate a `VoxelRegistry`. Every builder goes through
//! single-cell `insert`, so already occupied cells are skipped silently and
//! the registry invariants hold no matter how the builders overlap.
//!
//! All randomness comes from an injected `fastrand::Rng`; seeding it fixes the
//! generated layout.

use cgmath::{Point3, Vector3};
use log::debug;
use noise::{NoiseFn, Perlin};

use super::block::{MaterialKind, Position};
use super::registry::VoxelRegistry;

/// Trunk cells placed before the canopy starts.
const TRUNK_HEIGHT: i32 = 3;
/// Canopy levels that still get a wood cell in their centre.
const CANOPY_WOOD_LEVELS: i32 = 2;
/// Trees shorter than this get the wide canopy.
const WIDE_CANOPY_LIMIT: i32 = 15;
/// Tallest tree `insert_tree` builds; taller requests are clamped.
pub const MAX_TREE_HEIGHT: i32 = 64;
/// Horizontal sampling scale of the hills height field.
const HILLS_SCALE_FACTOR: f64 = 0.08;

/// How far a plane extends from its centre cell along each horizontal axis.
///
/// The world frame is X forward, Y right, Z up.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaneExtents {
    /// Cells in +X.
    pub forward: i32,
    /// Cells in -X.
    pub backward: i32,
    /// Cells in -Y.
    pub left: i32,
    /// Cells in +Y.
    pub right: i32,
}

impl PlaneExtents {
    /// The same extent in all four directions.
    pub fn square(half: i32) -> Self {
        PlaneExtents {
            forward: half,
            backward: half,
            left: half,
            right: half,
        }
    }

    /// A line of cells along X through the centre.
    pub fn along_x(backward: i32, forward: i32) -> Self {
        PlaneExtents {
            forward,
            backward,
            left: 0,
            right: 0,
        }
    }
}

impl VoxelRegistry {
    /// Fills the rectangle of cells around `center` at height `center.z`.
    ///
    /// # Arguments
    /// * `center` - The centre cell of the plane
    /// * `material` - The material to fill with
    /// * `extents` - Reach of the plane in each horizontal direction
    ///
    /// # Returns
    /// How many cells were actually filled.
    pub fn insert_plane(
        &mut self,
        center: Position,
        material: MaterialKind,
        extents: PlaneExtents,
    ) -> usize {
        let mut placed = 0;
        for dy in -extents.left..=extents.right {
            for dx in -extents.backward..=extents.forward {
                if self.insert(center + Vector3::new(dx, dy, 0), material) {
                    placed += 1;
                }
            }
        }
        placed
    }

    /// Grows an oak tree whose trunk starts at `base`.
    ///
    /// The trunk is three wood cells. Above it each canopy level `h` gets a
    /// wood cell on the first two levels and `half * half * 3` leaves at random
    /// offsets in `[-half, half]` on both horizontal axes, where `half` shrinks
    /// with height.
    ///
    /// # Arguments
    /// * `base` - Lowest trunk cell
    /// * `height` - Total tree height in cells, clamped to `0..=MAX_TREE_HEIGHT`
    /// * `rng` - Source of the leaf offsets
    pub fn insert_tree(&mut self, base: Position, height: i32, rng: &mut fastrand::Rng) {
        let height = height.clamp(0, MAX_TREE_HEIGHT);
        let mut level = base;
        for _ in 0..TRUNK_HEIGHT {
            self.insert(level, MaterialKind::Wood);
            level.z = level.z.saturating_add(1);
        }

        for h in 0..(height - TRUNK_HEIGHT) {
            if h < CANOPY_WOOD_LEVELS {
                self.insert(level, MaterialKind::Wood);
            }

            let mut half = ((height - h) / 6).max(0);
            if height < WIDE_CANOPY_LIMIT {
                half = half.max((height - h) / 2);
            }
            for _ in 0..half.saturating_mul(half).saturating_mul(3) {
                let shift = Vector3::new(rng.i32(-half..=half), rng.i32(-half..=half), 0);
                self.insert(level + shift, MaterialKind::Leaf);
            }
            level.z = level.z.saturating_add(1);
        }
    }

    /// Fills the inclusive box between `min` and `max` with water.
    ///
    /// # Returns
    /// How many cells were actually filled.
    pub fn insert_water_box(&mut self, min: Position, max: Position) -> usize {
        self.insert_box(min, max, MaterialKind::Water)
    }

    /// Fills the inclusive box between `min` and `max` with `material`.
    pub fn insert_box(&mut self, min: Position, max: Position, material: MaterialKind) -> usize {
        let mut placed = 0;
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    if self.insert(Point3::new(x, y, z), material) {
                        placed += 1;
                    }
                }
            }
        }
        placed
    }

    /// Makes `count` insertion attempts at uniform positions in the cube
    /// `[-size/2, size/2)` on every axis.
    ///
    /// With no `material` every cell gets a random solid building material.
    ///
    /// # Returns
    /// How many attempts landed on an empty cell.
    pub fn scatter_random(
        &mut self,
        material: Option<MaterialKind>,
        size: i32,
        count: usize,
        rng: &mut fastrand::Rng,
    ) -> usize {
        if size <= 0 {
            return 0;
        }
        let half = size / 2;
        let range = -half..size - half;

        let mut placed = 0;
        for _ in 0..count {
            let position = Point3::new(
                rng.i32(range.clone()),
                rng.i32(range.clone()),
                rng.i32(range.clone()),
            );
            let kind = material.unwrap_or_else(|| MaterialKind::random_solid(rng));
            if self.insert(position, kind) {
                placed += 1;
            }
        }
        debug!("Scattered {placed}/{count} blocks in a cube of {size}");
        placed
    }

    /// Builds the shell of the cube `[-size/2, size/2]` on every axis.
    ///
    /// Shell cells are visited x-, y-, z-ascending and the build stops once
    /// `max_blocks` cells have been attempted.
    ///
    /// # Returns
    /// How many cells were actually filled.
    pub fn insert_hollow_box(
        &mut self,
        material: MaterialKind,
        size: i32,
        max_blocks: usize,
    ) -> usize {
        let half = size.max(0) / 2;
        let mut attempts = 0;
        let mut placed = 0;

        'outer: for x in -half..=half {
            for y in -half..=half {
                for z in -half..=half {
                    if attempts >= max_blocks {
                        break 'outer;
                    }
                    let on_shell = x.abs() >= half || y.abs() >= half || z.abs() >= half;
                    if on_shell {
                        attempts += 1;
                        if self.insert(Point3::new(x, y, z), material) {
                            placed += 1;
                        }
                    }
                }
            }
        }
        debug!("Hollow box of {size}: {placed} {material} blocks");
        placed
    }

    /// Raises a Perlin height field of `material` over the square
    /// `[-extent, extent]` on X and Y.
    ///
    /// Each column is filled from z = 0 up to its sampled height, which lies in
    /// `0..=amplitude`.
    ///
    /// # Returns
    /// How many cells were actually filled.
    pub fn insert_hills(
        &mut self,
        material: MaterialKind,
        extent: i32,
        amplitude: i32,
        rng: &mut fastrand::Rng,
    ) -> usize {
        let perlin = Perlin::new(rng.u32(..));
        let amplitude = amplitude.max(0);
        let mut placed = 0;

        for x in -extent..=extent {
            for y in -extent..=extent {
                let sample = perlin.get([x as f64 * HILLS_SCALE_FACTOR, y as f64 * HILLS_SCALE_FACTOR]);
                let normalized = ((sample + 1.0) * 0.5).clamp(0.0, 1.0);
                let top = (normalized * amplitude as f64).round() as i32;
                for z in 0..=top {
                    if self.insert(Point3::new(x, y, z), material) {
                        placed += 1;
                    }
                }
            }
        }
        debug!("Hills of extent {extent}: {placed} {material} blocks");
        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_covers_inclusive_rectangle_on_named_axes() {
        let mut registry = VoxelRegistry::new();
        let extents = PlaneExtents {
            forward: 2,
            backward: 1,
            left: 0,
            right: 3,
        };
        let placed = registry.insert_plane(Point3::new(0, 0, 4), MaterialKind::Grass, extents);
        assert_eq!(placed, 4 * 4);
        assert!(registry.contains(Point3::new(2, 3, 4)));
        assert!(registry.contains(Point3::new(-1, 0, 4)));
        assert!(!registry.contains(Point3::new(0, -1, 4)));
        assert!(!registry.contains(Point3::new(3, 0, 4)));
    }

    #[test]
    fn plane_skips_occupied_cells() {
        let mut registry = VoxelRegistry::new();
        registry.insert(Point3::new(0, 0, 0), MaterialKind::Stone);
        let placed = registry.insert_plane(Point3::new(0, 0, 0), MaterialKind::Grass, PlaneExtents::square(1));
        assert_eq!(placed, 8);
        assert_eq!(registry.try_get_material(Point3::new(0, 0, 0)), Some(MaterialKind::Stone));
    }

    #[test]
    fn tree_is_deterministic_under_a_fixed_seed() {
        let build = || {
            let mut registry = VoxelRegistry::new();
            registry.insert_tree(Point3::new(0, 0, 1), 7, &mut fastrand::Rng::with_seed(42));
            let mut leaves: Vec<_> = registry
                .groups()
                .filter(|g| g.material() == MaterialKind::Leaf)
                .flat_map(|g| g.cells().to_vec())
                .map(|p| (p.x, p.y, p.z))
                .collect();
            leaves.sort();
            (registry.group_len(MaterialKind::Wood), leaves)
        };

        let (wood, leaves) = build();
        assert_eq!(wood, 5);
        assert!(!leaves.is_empty());
        assert_eq!(build().1, leaves);
    }

    #[test]
    fn tree_trunk_is_contiguous() {
        let mut registry = VoxelRegistry::new();
        registry.insert_tree(Point3::new(3, 3, 0), 7, &mut fastrand::Rng::with_seed(1));
        for z in 0..5 {
            assert!(registry.contains_of(Point3::new(3, 3, z), MaterialKind::Wood));
        }
    }

    #[test]
    fn oversized_tree_is_clamped() {
        let mut registry = VoxelRegistry::new();
        registry.insert_tree(Point3::new(0, 0, 0), 200_000, &mut fastrand::Rng::with_seed(3));
        assert_eq!(registry.group_len(MaterialKind::Wood), 5);
        let top = registry
            .groups()
            .flat_map(|g| g.cells().iter().map(|p| p.z))
            .max();
        assert!(top.is_some_and(|z| z < MAX_TREE_HEIGHT));
    }

    #[test]
    fn water_box_is_solid_and_inclusive() {
        let mut registry = VoxelRegistry::new();
        let placed = registry.insert_water_box(Point3::new(-3, -8, 1), Point3::new(3, -5, 4));
        assert_eq!(placed, 7 * 4 * 4);
        assert_eq!(registry.group_len(MaterialKind::Water), placed);
    }

    #[test]
    fn scatter_stays_inside_the_cube() {
        let mut registry = VoxelRegistry::new();
        let mut rng = fastrand::Rng::with_seed(9);
        let placed = registry.scatter_random(Some(MaterialKind::Grass), 8, 200, &mut rng);
        assert_eq!(placed, registry.block_count());
        for group in registry.groups() {
            for p in group.cells() {
                for c in [p.x, p.y, p.z] {
                    assert!((-4..4).contains(&c));
                }
            }
        }
    }

    #[test]
    fn scatter_without_material_uses_solid_building_blocks() {
        let mut registry = VoxelRegistry::new();
        let mut rng = fastrand::Rng::with_seed(5);
        let placed = registry.scatter_random(None, 16, 300, &mut rng);
        assert_eq!(placed, registry.block_count());
        assert!(registry.groups().count() > 1);
        for group in registry.groups() {
            let material = group.material();
            assert!(material.is_placeable());
            assert!(!material.render_info().is_delayed());
        }
    }

    #[test]
    fn hollow_box_fills_only_the_shell() {
        let mut registry = VoxelRegistry::new();
        let placed = registry.insert_hollow_box(MaterialKind::Stone, 4, usize::MAX);
        assert_eq!(placed, 5 * 5 * 5 - 3 * 3 * 3);
        assert!(!registry.contains(Point3::new(0, 0, 0)));

        let mut capped = VoxelRegistry::new();
        assert_eq!(capped.insert_hollow_box(MaterialKind::Stone, 4, 10), 10);
    }

    #[test]
    fn hills_fill_every_column_from_the_floor() {
        let mut registry = VoxelRegistry::new();
        let mut rng = fastrand::Rng::with_seed(3);
        registry.insert_hills(MaterialKind::Grass, 4, 6, &mut rng);
        for x in -4..=4 {
            for y in -4..=4 {
                assert!(registry.contains(Point3::new(x, y, 0)));
                assert!(!registry.contains(Point3::new(x, y, 7)));
            }
        }
    }
}
