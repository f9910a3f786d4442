//! Ordered draw commands over one emitted vertex stream.

use std::fmt;

use super::{BlendMode, RenderGroup, ShaderId, TextureId, Topology};

/// One draw call the host should issue.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCommand {
    /// Region of the stream being drawn.
    pub group: RenderGroup,
    /// Primitive topology.
    pub topology: Topology,
    /// Pixel shader to bind.
    pub shader: ShaderId,
    /// Texture to bind.
    pub texture: TextureId,
    /// Blend state class.
    pub blend: BlendMode,
    /// Number of vertices in the region.
    pub vertex_count: usize,
    /// Index of the region's first vertex in the emitted stream.
    pub vertex_offset: usize,
}

impl DrawCommand {
    /// Builds the command for a region of `vertex_count` vertices at `vertex_offset`.
    pub fn new(group: RenderGroup, vertex_count: usize, vertex_offset: usize) -> Self {
        let info = group.info();
        DrawCommand {
            group,
            topology: info.topology,
            shader: info.shader,
            texture: info.texture,
            blend: info.blend,
            vertex_count,
            vertex_offset,
        }
    }

    /// One past the last vertex of the region.
    pub fn end(&self) -> usize {
        self.vertex_offset + self.vertex_count
    }
}

/// The full ordered list of draws for a frame.
///
/// Order: debug rays, opaque material groups, delayed (transparent) material
/// groups, then the put preview. Within each blend class groups keep their
/// registration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawPlan {
    commands: Vec<DrawCommand>,
}

impl DrawPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command unless its region is empty.
    pub fn push(&mut self, command: DrawCommand) {
        if command.vertex_count > 0 {
            self.commands.push(command);
        }
    }

    /// The commands in submission order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Total number of vertices drawn by the plan.
    pub fn vertex_count(&self) -> usize {
        self.commands.iter().map(|c| c.vertex_count).sum()
    }

    /// Iterates over the commands in submission order.
    pub fn iter(&self) -> std::slice::Iter<'_, DrawCommand> {
        self.commands.iter()
    }
}

impl<'a> IntoIterator for &'a DrawPlan {
    type Item = &'a DrawCommand;
    type IntoIter = std::slice::Iter<'a, DrawCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl fmt::Display for DrawPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for command in &self.commands {
            writeln!(
                f,
                "{:?} {:?} {:?} [{}..{})",
                command.group,
                command.shader,
                command.blend,
                command.vertex_offset,
                command.end()
            )?;
        }
        Ok(())
    }
}
