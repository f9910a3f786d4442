//! # Block Module
//!
//! This module provides the core block-related types for the voxel world:
//! grid positions, the material set and the six block faces.

use cgmath::Point3;

pub use material::MaterialKind;

pub mod block_side;
pub mod material;

/// The underlying integer type used to represent materials compactly.
pub type MaterialId = u8;

/// An exact integer grid coordinate. Cell `p` spans `p - 0.5 ..= p + 0.5` on each axis.
pub type Position = Point3<i32>;

/// Edge length of a block in world units.
pub const BLOCK_SIZE: f32 = 1.0;

/// Half the edge length of a block.
pub const HALF_BLOCK_SIZE: f32 = BLOCK_SIZE * 0.5;

/// Represents a single voxel block in the world.
///
/// Blocks are plain values; the registry stores them by position and
/// partitions them into per-material groups.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Block {
    /// Grid cell the block occupies.
    pub position: Position,
    /// What the block is made of.
    pub material: MaterialKind,
}

impl Block {
    /// Creates a new block of the specified material.
    ///
    /// # Arguments
    /// * `position` - The grid cell to occupy
    /// * `material` - The material of the block
    ///
    /// # Returns
    /// A new `Block` instance.
    pub fn new(position: Position, material: MaterialKind) -> Self {
        Block { position, material }
    }

    /// World-space centre of the block.
    pub fn center(&self) -> Point3<f32> {
        position_center(self.position)
    }
}

/// World-space centre of the cell at `position`.
pub fn position_center(position: Position) -> Point3<f32> {
    Point3::new(position.x as f32, position.y as f32, position.z as f32)
}

/// The cell whose unit cube contains `point`.
pub fn cell_containing(point: Point3<f32>) -> Position {
    Point3::new(
        point.x.round() as i32,
        point.y.round() as i32,
        point.z.round() as i32,
    )
}
