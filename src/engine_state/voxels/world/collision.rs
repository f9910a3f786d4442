//! Column and cell queries used by player physics.

use cgmath::{Point2, Point3};

use crate::engine_state::voxels::block::{Position, HALF_BLOCK_SIZE};
use crate::engine_state::voxels::registry::VoxelRegistry;

/// Whether the cell at `position` holds a liquid.
pub fn is_in_liquid(registry: &VoxelRegistry, position: Position) -> bool {
    registry
        .try_get_material(position)
        .is_some_and(|material| material.is_liquid())
}

/// Height of the walkable surface in `column`.
///
/// The scan starts at `scan_top` and moves down past empty and liquid cells
/// until it reaches a solid cell or drops below z = 0. From there it climbs
/// while the cell above is occupied, stopping under the first liquid cell.
/// The result is the top face of the last cell of that stack.
///
/// # Arguments
/// * `registry` - The blocks to test against
/// * `column` - The (x, y) column to scan
/// * `scan_top` - Highest z considered
///
/// # Returns
/// The surface z. A column with nothing solid at or above z = 0 yields
/// `-1 + HALF_BLOCK_SIZE`.
pub fn ground_height(registry: &VoxelRegistry, column: Point2<i32>, scan_top: i32) -> f32 {
    let passable = |z: i32| {
        let cell = Point3::new(column.x, column.y, z);
        !registry.contains(cell) || is_in_liquid(registry, cell)
    };

    let mut z = scan_top;
    while passable(z) && z >= 0 {
        z -= 1;
    }

    loop {
        z += 1;
        let cell = Point3::new(column.x, column.y, z);
        if is_in_liquid(registry, cell) || !registry.contains(cell) {
            break;
        }
    }
    z -= 1;

    z as f32 + HALF_BLOCK_SIZE
}
