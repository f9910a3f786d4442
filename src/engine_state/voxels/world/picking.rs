//! Ray tests against unit cells.
//!
//! Picking needs two answers per cell: how far along the ray the cell's box is
//! entered, and which face the ray crosses on the way in. Both are computed
//! analytically; nothing here touches the registry.

use cgmath::{InnerSpace, Point3, Vector3};

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::{position_center, Position, HALF_BLOCK_SIZE};

/// A half-line in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Point3<f32>,
    /// Direction of travel. Not required to be normalized.
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Creates a ray from `origin` along `direction`.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Self {
        Ray { origin, direction }
    }

    /// The point at parameter `t`.
    pub fn at(&self, t: f32) -> Point3<f32> {
        self.origin + self.direction * t
    }

    /// Whether the ray can hit anything at all.
    ///
    /// Zero-length and non-finite directions are degenerate.
    pub fn is_degenerate(&self) -> bool {
        let length2 = self.direction.magnitude2();
        !(length2 > 0.0 && length2.is_finite())
            || !(self.origin.x.is_finite() && self.origin.y.is_finite() && self.origin.z.is_finite())
    }
}

/// Ray parameter at which `ray` enters the unit box of `cell`.
///
/// A ray starting inside the box enters it at `0`. Boxes entirely behind the
/// origin are missed.
pub fn intersect_cell(ray: &Ray, cell: Position) -> Option<f32> {
    let center = position_center(cell);
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        let min = center[axis] - HALF_BLOCK_SIZE;
        let max = center[axis] + HALF_BLOCK_SIZE;

        if direction == 0.0 {
            if origin < min || origin > max {
                return None;
            }
            continue;
        }

        let inv = 1.0 / direction;
        let (near, far) = {
            let t0 = (min - origin) * inv;
            let t1 = (max - origin) * inv;
            if t0 <= t1 {
                (t0, t1)
            } else {
                (t1, t0)
            }
        };
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}

/// Whether `ray` crosses the quad of `side` on the box of `cell`.
fn crosses_face(ray: &Ray, cell: Position, side: BlockSide) -> bool {
    let normal = side.normal();
    let denom = ray.direction.dot(normal);
    if denom == 0.0 {
        return false;
    }

    let face_center = side.face_center(cell);
    let t = (face_center - ray.origin).dot(normal) / denom;
    if t < 0.0 {
        return false;
    }

    let hit = ray.at(t);
    (0..3)
        .filter(|&axis| normal[axis] == 0.0)
        .all(|axis| (hit[axis] - face_center[axis]).abs() <= HALF_BLOCK_SIZE)
}

/// The face through which `ray` enters the box of `cell`.
///
/// Faces are tried in the order FRONT, BACK, RIGHT, LEFT, TOP, BOTTOM; the
/// first front-facing quad the ray crosses wins.
pub fn entry_face(ray: &Ray, cell: Position) -> Option<BlockSide> {
    BlockSide::all()
        .into_iter()
        .find(|side| side.faces_against(ray.direction) && crosses_face(ray, cell, *side))
}
