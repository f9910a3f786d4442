//! Rendering contract for the voxel world.
//!
//! This module contains everything the core hands to a host renderer: the
//! vertex layout, the per-block geometry tables, the closed material to render
//! group table and the ordered draw plan. It owns no device state; the host
//! uploads the emitted vertices and issues the planned draws.

use cgmath::Vector3;

pub mod draw_plan;
pub mod geometry;
pub mod render_group;
pub mod vertex;

// Re-export commonly used types
pub use draw_plan::{DrawCommand, DrawPlan};
pub use geometry::{emit_block, emit_segment, Topology, VERTICES_PER_SEGMENT};
pub use render_group::{BlendMode, RenderGroup, RenderGroupInfo, ShaderId, TextureId};
pub use vertex::{vertices_as_bytes, Vertex, VertexAttribute, VertexFormat};

/// Linear RGB tint carried by every vertex.
pub type Color = Vector3<f32>;
