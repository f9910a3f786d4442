//! Per-block geometry emission.
//!
//! Every solid block is a 36-vertex triangle-list cube and every outline block a
//! 24-vertex line-list wireframe. The corner order, winding and texture
//! coordinates below are load-bearing for the host's shaders and must not be
//! reordered.

use cgmath::{Point3, Vector3};

use crate::engine_state::voxels::block::HALF_BLOCK_SIZE;

use super::{Color, Vertex};

/// Primitive topology of a render group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topology {
    /// Independent triangles, three vertices each.
    TriangleList,
    /// Independent segments, two vertices each.
    LineList,
}

impl Topology {
    /// How many vertices a single block emits in this topology.
    pub fn vertices_per_block(self) -> usize {
        match self {
            Topology::TriangleList => CUBE_TRIANGLES.len(),
            Topology::LineList => CUBE_LINES.len(),
        }
    }
}

/// Vertices of one line segment.
pub const VERTICES_PER_SEGMENT: usize = 2;

/// Corner of the unit cube as signs along (front, right, up) = (X, Y, Z).
type Corner = (f32, f32, f32);

#[rustfmt::skip]
const CUBE_TRIANGLES: [(Corner, [f32; 2]); 36] = [
    // Up
    ((-1.0, -1.0,  1.0), [0.5, 1.0]),
    (( 1.0,  1.0,  1.0), [1.0, 0.0]),
    ((-1.0,  1.0,  1.0), [0.5, 0.0]),
    ((-1.0, -1.0,  1.0), [0.5, 1.0]),
    (( 1.0, -1.0,  1.0), [1.0, 1.0]),
    (( 1.0,  1.0,  1.0), [1.0, 0.0]),

    // Down
    ((-1.0, -1.0, -1.0), [0.5, 1.0]),
    ((-1.0,  1.0, -1.0), [0.5, 0.0]),
    (( 1.0,  1.0, -1.0), [1.0, 0.0]),
    ((-1.0, -1.0, -1.0), [0.5, 1.0]),
    (( 1.0,  1.0, -1.0), [1.0, 0.0]),
    (( 1.0, -1.0, -1.0), [1.0, 1.0]),

    // Front
    (( 1.0, -1.0, -1.0), [0.0, 1.0]),
    (( 1.0,  1.0,  1.0), [0.5, 0.0]),
    (( 1.0, -1.0,  1.0), [0.0, 0.0]),
    (( 1.0, -1.0, -1.0), [0.0, 1.0]),
    (( 1.0,  1.0, -1.0), [0.5, 1.0]),
    (( 1.0,  1.0,  1.0), [0.5, 0.0]),

    // Back
    ((-1.0, -1.0, -1.0), [0.0, 1.0]),
    ((-1.0, -1.0,  1.0), [0.0, 0.0]),
    ((-1.0,  1.0,  1.0), [0.5, 0.0]),
    ((-1.0, -1.0, -1.0), [0.0, 1.0]),
    ((-1.0,  1.0,  1.0), [0.5, 0.0]),
    ((-1.0,  1.0, -1.0), [0.5, 1.0]),

    // Right
    ((-1.0,  1.0, -1.0), [0.0, 1.0]),
    ((-1.0,  1.0,  1.0), [0.0, 0.0]),
    (( 1.0,  1.0,  1.0), [0.5, 0.0]),
    ((-1.0,  1.0, -1.0), [0.0, 1.0]),
    (( 1.0,  1.0,  1.0), [0.5, 0.0]),
    (( 1.0,  1.0, -1.0), [0.5, 1.0]),

    // Left
    ((-1.0, -1.0, -1.0), [0.0, 1.0]),
    (( 1.0, -1.0,  1.0), [0.5, 0.0]),
    ((-1.0, -1.0,  1.0), [0.0, 0.0]),
    ((-1.0, -1.0, -1.0), [0.0, 1.0]),
    (( 1.0, -1.0, -1.0), [0.5, 1.0]),
    (( 1.0, -1.0,  1.0), [0.5, 0.0]),
];

#[rustfmt::skip]
const CUBE_LINES: [Corner; 24] = [
    // Up plane
    (-1.0, -1.0,  1.0), (-1.0,  1.0,  1.0),
    (-1.0,  1.0,  1.0), ( 1.0,  1.0,  1.0),
    ( 1.0,  1.0,  1.0), ( 1.0, -1.0,  1.0),
    ( 1.0, -1.0,  1.0), (-1.0, -1.0,  1.0),

    // Bottom plane
    (-1.0, -1.0, -1.0), (-1.0,  1.0, -1.0),
    (-1.0,  1.0, -1.0), ( 1.0,  1.0, -1.0),
    ( 1.0,  1.0, -1.0), ( 1.0, -1.0, -1.0),
    ( 1.0, -1.0, -1.0), (-1.0, -1.0, -1.0),

    // Side edges
    (-1.0, -1.0, -1.0), (-1.0, -1.0,  1.0),
    (-1.0,  1.0, -1.0), (-1.0,  1.0,  1.0),
    ( 1.0, -1.0, -1.0), ( 1.0, -1.0,  1.0),
    ( 1.0,  1.0, -1.0), ( 1.0,  1.0,  1.0),
];

fn corner_position(center: Point3<f32>, corner: Corner) -> Point3<f32> {
    center + Vector3::new(corner.0, corner.1, corner.2) * HALF_BLOCK_SIZE
}

/// Appends the geometry of one block centred at `center` to `sink`.
///
/// # Arguments
/// * `topology` - Triangle cube or wireframe outline
/// * `center` - World-space centre of the block
/// * `color` - Tint applied to every vertex
/// * `sink` - Destination of the emitted vertices
pub fn emit_block<S: Extend<Vertex>>(
    topology: Topology,
    center: Point3<f32>,
    color: Color,
    sink: &mut S,
) {
    match topology {
        Topology::TriangleList => sink.extend(CUBE_TRIANGLES.iter().map(|(corner, uv)| {
            Vertex::new(corner_position(center, *corner), color, uv[0], uv[1])
        })),
        Topology::LineList => sink.extend(
            CUBE_LINES
                .iter()
                .map(|corner| Vertex::untextured(corner_position(center, *corner), color)),
        ),
    }
}

/// Appends a two-vertex segment from `start` to `end`.
pub fn emit_segment<S: Extend<Vertex>>(
    start: Point3<f32>,
    end: Point3<f32>,
    color: Color,
    sink: &mut S,
) {
    sink.extend([Vertex::untextured(start, color), Vertex::untextured(end, color)]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_counts_match_topology() {
        assert_eq!(Topology::TriangleList.vertices_per_block(), 36);
        assert_eq!(Topology::LineList.vertices_per_block(), 24);

        let mut triangles = Vec::new();
        emit_block(Topology::TriangleList, Point3::new(0.0, 0.0, 0.0), Color::new(1.0, 1.0, 1.0), &mut triangles);
        assert_eq!(triangles.len(), 36);

        let mut lines = Vec::new();
        emit_block(Topology::LineList, Point3::new(0.0, 0.0, 0.0), Color::new(1.0, 1.0, 1.0), &mut lines);
        assert_eq!(lines.len(), 24);
        assert!(lines.iter().all(|v| v.uv == [0.0, 0.0]));
    }

    #[test]
    fn cube_spans_one_unit_around_center() {
        let mut vertices = Vec::new();
        let center = Point3::new(5.0, -2.0, 3.0);
        emit_block(Topology::TriangleList, center, Color::new(0.3, 0.3, 0.3), &mut vertices);
        for v in &vertices {
            assert!((v.position[0] - center.x).abs() == 0.5);
            assert!((v.position[1] - center.y).abs() == 0.5);
            assert!((v.position[2] - center.z).abs() == 0.5);
            assert_eq!(v.color, [0.3, 0.3, 0.3]);
        }
    }

    #[test]
    fn every_wireframe_edge_is_axis_aligned_and_unit_long() {
        let mut vertices = Vec::new();
        emit_block(Topology::LineList, Point3::new(0.0, 0.0, 0.0), Color::new(1.0, 1.0, 1.0), &mut vertices);
        for segment in vertices.chunks(2) {
            let d: Vec<f32> = (0..3)
                .map(|i| (segment[0].position[i] - segment[1].position[i]).abs())
                .collect();
            assert_eq!(d.iter().filter(|x| **x == 1.0).count(), 1);
            assert_eq!(d.iter().filter(|x| **x == 0.0).count(), 2);
        }
    }
}
