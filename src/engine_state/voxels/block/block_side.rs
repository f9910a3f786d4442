//! # Block Side Module
//!
//! This module defines the six faces of a voxel block in the world frame
//! (X forward, Y right, Z up). Picking uses the faces to decide which
//! neighbouring cell a put command would fill.

use cgmath::{InnerSpace, Point3, Vector3};

use super::Position;

/// Represents the six possible faces of a voxel block.
///
/// The discriminants follow the order in which picking tests the faces:
/// [FRONT, BACK, RIGHT, LEFT, TOP, BOTTOM], i.e. +X, -X, +Y, -Y, +Z, -Z.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive X)
    FRONT = 0,

    /// The back face (facing negative X)
    BACK = 1,

    /// The right face (facing positive Y)
    RIGHT = 2,

    /// The left face (facing negative Y)
    LEFT = 3,

    /// The top face (facing positive Z)
    TOP = 4,

    /// The bottom face (facing negative Z)
    BOTTOM = 5,
}

impl BlockSide {
    /// Returns all six block faces in picking order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
        ]
    }

    /// Integer offset from a cell to its neighbour across this face.
    pub fn offset(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(1, 0, 0),
            BlockSide::BACK => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 0, 1),
            BlockSide::BOTTOM => Vector3::new(0, 0, -1),
        }
    }

    /// Outward unit normal of this face.
    pub fn normal(self) -> Vector3<f32> {
        self.offset().cast::<f32>().unwrap_or_else(Vector3::unit_z)
    }

    /// The cell on the other side of this face.
    pub fn neighbour_of(self, position: Position) -> Position {
        position + self.offset()
    }

    /// Whether a ray travelling along `direction` sees this face from the front.
    ///
    /// A face is front-facing when its outward normal opposes the direction.
    pub fn faces_against(self, direction: Vector3<f32>) -> bool {
        direction.dot(self.normal()) < 0.0
    }

    /// Centre of this face on the unit cube centred at `position`.
    pub fn face_center(self, position: Position) -> Point3<f32> {
        let center = Point3::new(position.x as f32, position.y as f32, position.z as f32);
        center + self.normal() * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_unit_and_opposite_in_pairs() {
        let sides = BlockSide::all();
        for pair in sides.chunks(2) {
            assert_eq!(pair[0].offset() + pair[1].offset(), Vector3::new(0, 0, 0));
        }
        for side in sides {
            let o = side.offset();
            assert_eq!(o.x.abs() + o.y.abs() + o.z.abs(), 1);
        }
    }

    #[test]
    fn front_face_opposes_incoming_ray() {
        let towards_minus_x = Vector3::new(-1.0, 0.0, 0.0);
        assert!(BlockSide::FRONT.faces_against(towards_minus_x));
        assert!(!BlockSide::BACK.faces_against(towards_minus_x));
        assert!(!BlockSide::TOP.faces_against(towards_minus_x));
    }
}
