//! Fixed mapping from materials to render groups.
//!
//! A render group is everything the host needs to batch one draw: topology,
//! pixel shader, texture, base tint and whether the draw is alpha blended after
//! the opaque pass. The table is closed; there is no lookup by name.

use crate::engine_state::voxels::block::MaterialKind;

use super::{Color, Topology};

/// Pixel shader a render group binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShaderId {
    /// Opaque textured block.
    TextureBlock,
    /// Alpha-tested / blended textured block.
    TransparentBlock,
    /// Animated liquid surface.
    LiquidBlock,
    /// Flat-colour line geometry.
    LineBlock,
}

/// Texture a render group binds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TextureId {
    /// No texture bound.
    None,
    /// Grass atlas.
    Grass,
    /// Sand.
    Sand,
    /// Stone.
    Stone,
    /// Oak trunk bark.
    OakWood,
    /// Oak leaves.
    OakLeaf,
    /// Glass pane.
    Glass,
    /// Water surface.
    Water,
}

/// Blend class of a draw.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Drawn first with the default blend state.
    Opaque,
    /// Drawn after all opaque geometry with the transparent blend state.
    Transparent,
}

/// One region of the emitted vertex stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RenderGroup {
    /// Debug ray segments.
    DebugRays,
    /// All registry blocks of one material.
    Material(MaterialKind),
    /// The put-target outline.
    PutPreview,
}

/// Static description of how a render group is drawn.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderGroupInfo {
    /// Primitive topology of the group's geometry.
    pub topology: Topology,
    /// Pixel shader to bind.
    pub shader: ShaderId,
    /// Texture to bind.
    pub texture: TextureId,
    /// Base tint written into every vertex unless overridden.
    pub base_color: Color,
    /// Opaque or delayed transparent pass.
    pub blend: BlendMode,
}

const DEFAULT_TINT: f32 = 0.3;

impl RenderGroupInfo {
    const fn textured(shader: ShaderId, texture: TextureId, blend: BlendMode) -> Self {
        RenderGroupInfo {
            topology: Topology::TriangleList,
            shader,
            texture,
            base_color: Color {
                x: DEFAULT_TINT,
                y: DEFAULT_TINT,
                z: DEFAULT_TINT,
            },
            blend,
        }
    }

    const fn outline() -> Self {
        RenderGroupInfo {
            topology: Topology::LineList,
            shader: ShaderId::LineBlock,
            texture: TextureId::None,
            base_color: Color {
                x: 1.0,
                y: 1.0,
                z: 1.0,
            },
            blend: BlendMode::Opaque,
        }
    }

    /// Vertices one block of this group emits.
    pub fn vertices_per_block(&self) -> usize {
        self.topology.vertices_per_block()
    }

    /// Whether the group is drawn in the delayed transparent pass.
    pub fn is_delayed(&self) -> bool {
        self.blend == BlendMode::Transparent
    }
}

impl MaterialKind {
    /// The render group description of this material.
    pub fn render_info(self) -> RenderGroupInfo {
        use BlendMode::*;
        use ShaderId::*;

        match self {
            MaterialKind::PutPreview => RenderGroupInfo::outline(),
            MaterialKind::Grass => RenderGroupInfo::textured(TextureBlock, TextureId::Grass, Opaque),
            MaterialKind::Sand => RenderGroupInfo::textured(TextureBlock, TextureId::Sand, Opaque),
            MaterialKind::Stone => RenderGroupInfo::textured(TextureBlock, TextureId::Stone, Opaque),
            MaterialKind::Wood => RenderGroupInfo::textured(TextureBlock, TextureId::OakWood, Opaque),
            MaterialKind::Leaf => {
                RenderGroupInfo::textured(TransparentBlock, TextureId::OakLeaf, Transparent)
            }
            MaterialKind::Glass => {
                RenderGroupInfo::textured(TransparentBlock, TextureId::Glass, Transparent)
            }
            MaterialKind::Water => RenderGroupInfo::textured(LiquidBlock, TextureId::Water, Transparent),
        }
    }
}

impl RenderGroup {
    /// The render group description of this region.
    pub fn info(self) -> RenderGroupInfo {
        match self {
            RenderGroup::DebugRays => RenderGroupInfo::outline(),
            RenderGroup::Material(material) => material.render_info(),
            RenderGroup::PutPreview => MaterialKind::PutPreview.render_info(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_materials_are_delayed() {
        let delayed: Vec<_> = MaterialKind::ALL
            .into_iter()
            .filter(|m| m.render_info().is_delayed())
            .collect();
        assert_eq!(
            delayed,
            vec![MaterialKind::Leaf, MaterialKind::Glass, MaterialKind::Water]
        );
    }

    #[test]
    fn only_the_preview_uses_lines() {
        for material in MaterialKind::ALL {
            let expected = if material == MaterialKind::PutPreview {
                Topology::LineList
            } else {
                Topology::TriangleList
            };
            assert_eq!(material.render_info().topology, expected);
        }
    }
}
