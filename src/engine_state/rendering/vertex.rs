//! Vertex data structures and layouts for block rendering.
//!
//! This module defines the vertex format every emitted block uses and a
//! host-agnostic description of its attributes, so a renderer can build its
//! input layout without the core depending on a graphics API.

use cgmath::Point3;

use super::Color;

/// A vertex in the block rendering pipeline.
///
/// # Memory Layout
/// - Position: 3x f32 (12 bytes)
/// - Color: 3x f32 (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Linear RGB tint
    pub color: [f32; 3],
    /// UV texture coordinates. Zero for line topology.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Creates a new vertex with the given parameters.
    ///
    /// # Arguments
    /// * `pos` - The 3D position of the vertex in world space
    /// * `color` - The tint of the vertex
    /// * `u` - U texture coordinate
    /// * `v` - V texture coordinate
    ///
    /// # Returns
    /// A new `Vertex` instance
    pub fn new(pos: Point3<f32>, color: Color, u: f32, v: f32) -> Self {
        Vertex {
            position: pos.into(),
            color: color.into(),
            uv: [u, v],
        }
    }

    /// Creates a vertex without texture coordinates, as used by line geometry.
    pub fn untextured(pos: Point3<f32>, color: Color) -> Self {
        Self::new(pos, color, 0.0, 0.0)
    }

    /// Byte stride of one vertex in a vertex buffer.
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();

    /// Describes how the vertex is laid out in memory.
    ///
    /// # Shader Attributes
    /// - `POSITION`: f32x3 at offset 0
    /// - `COLOR`: f32x3 at offset 12
    /// - `TEXCOORD`: f32x2 at offset 24
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            semantic: "POSITION",
            format: VertexFormat::Float32x3,
            offset: 0,
        },
        VertexAttribute {
            semantic: "COLOR",
            format: VertexFormat::Float32x3,
            offset: std::mem::size_of::<[f32; 3]>(),
        },
        VertexAttribute {
            semantic: "TEXCOORD",
            format: VertexFormat::Float32x2,
            offset: std::mem::size_of::<[f32; 6]>(),
        },
    ];
}

/// Component format of a vertex attribute.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexFormat {
    /// Two 32-bit floats.
    Float32x2,
    /// Three 32-bit floats.
    Float32x3,
}

impl VertexFormat {
    /// Size of the attribute in bytes.
    pub fn size(self) -> usize {
        match self {
            VertexFormat::Float32x2 => 8,
            VertexFormat::Float32x3 => 12,
        }
    }
}

/// One entry of a vertex input layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Semantic name the shader binds the attribute to.
    pub semantic: &'static str,
    /// Component format.
    pub format: VertexFormat,
    /// Byte offset from the start of the vertex.
    pub offset: usize,
}

/// Reinterprets a vertex slice as raw bytes for upload.
pub fn vertices_as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}
