//! # Voxel Registry Module
//!
//! This module provides the `VoxelRegistry`, the sparse store of every block in
//! the world. Blocks are keyed by integer grid position and partitioned into
//! one group per material so that a host can batch one draw per group.
//!
//! ## Storage
//!
//! - `lookup`: a hash map from position to the slot holding the block, giving
//!   O(1) membership and material queries
//! - `groups`: one `MaterialGroup` per material, in the order the material was
//!   first inserted. Each group keeps its cells in a dense vector so emission
//!   walks contiguous memory
//!
//! Removal swaps the last cell of a group into the freed slot, so the order of
//! cells inside a group changes only when the registry content changes.
//!
//! ## Dirty Tracking
//!
//! The registry carries a single `dirty` flag. Every successful `insert` or
//! `remove` sets it; only a full `emit_vertices` pass clears it.

use std::collections::HashMap;

use log::trace;

use crate::engine_state::rendering::{emit_block, Color, Vertex};

use super::block::{Block, MaterialKind, Position};

/// All blocks of a single material, in a stable per-frame order.
#[derive(Clone, Debug)]
pub struct MaterialGroup {
    material: MaterialKind,
    cells: Vec<Position>,
}

impl MaterialGroup {
    fn new(material: MaterialKind) -> Self {
        MaterialGroup {
            material,
            cells: Vec::new(),
        }
    }

    /// The material every block in the group is made of.
    pub fn material(&self) -> MaterialKind {
        self.material
    }

    /// Positions of the group's blocks in emission order.
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    /// Number of blocks in the group.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the group currently holds no blocks.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Vertices this group contributes to a full emission.
    pub fn vertex_count(&self) -> usize {
        self.material.render_info().vertices_per_block() * self.cells.len()
    }

    /// Iterates over the group's blocks in emission order.
    pub fn blocks(&self) -> impl Iterator<Item = Block> + '_ {
        self.cells
            .iter()
            .map(move |position| Block::new(*position, self.material))
    }
}

/// Where a stored block lives inside `groups`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Slot {
    group: usize,
    index: usize,
}

/// Sparse mapping from grid position to block, grouped by material.
///
/// At most one block occupies a position. The total block count always equals
/// the sum of the group sizes.
#[derive(Clone, Debug, Default)]
pub struct VoxelRegistry {
    groups: Vec<MaterialGroup>,
    lookup: HashMap<Position, Slot>,
    dirty: bool,
}

impl VoxelRegistry {
    /// Creates a new, empty registry.
    ///
    /// # Returns
    /// A `VoxelRegistry` with no blocks and a clear dirty flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a block of `material` at `position`.
    ///
    /// # Arguments
    /// * `position` - The cell to fill
    /// * `material` - The material of the new block
    ///
    /// # Returns
    /// `false` without touching any state if the cell is already occupied by
    /// any material, `true` otherwise.
    pub fn insert(&mut self, position: Position, material: MaterialKind) -> bool {
        if self.lookup.contains_key(&position) {
            return false;
        }

        let group = self.group_index_or_create(material);
        let cells = &mut self.groups[group].cells;
        let slot = Slot {
            group,
            index: cells.len(),
        };
        cells.push(position);
        self.lookup.insert(position, slot);
        self.dirty = true;
        true
    }

    /// Removes whatever block occupies `position`.
    ///
    /// # Returns
    /// `false` if the cell was empty, `true` otherwise.
    pub fn remove(&mut self, position: Position) -> bool {
        match self.take(position) {
            Some(_) => {
                self.dirty = true;
                true
            }
            None => false,
        }
    }

    /// Empties the group of `material`.
    ///
    /// The group keeps its place in the group order. The dirty flag is left
    /// untouched; this is an overlay refresh, not a world edit.
    ///
    /// # Returns
    /// How many blocks were removed.
    pub fn remove_all_of(&mut self, material: MaterialKind) -> usize {
        let Some(group) = self.group_index(material) else {
            return 0;
        };

        let cells = std::mem::take(&mut self.groups[group].cells);
        for position in &cells {
            self.lookup.remove(position);
        }
        trace!("Cleared {} {} blocks", cells.len(), material);
        cells.len()
    }

    /// Removes one block chosen uniformly at random.
    ///
    /// # Returns
    /// The removed block, or `None` if the registry was empty.
    pub fn remove_random(&mut self, rng: &mut fastrand::Rng) -> Option<Block> {
        let total = self.block_count();
        if total == 0 {
            return None;
        }
        let mut index = rng.usize(..total);
        let position = self.groups.iter().find_map(|group| {
            if index < group.cells.len() {
                Some(group.cells[index])
            } else {
                index -= group.cells.len();
                None
            }
        })?;
        let material = self.take(position)?;
        self.dirty = true;
        trace!("Removed random {} block at {:?}", material, position);
        Some(Block { position, material })
    }

    /// Whether any block occupies `position`.
    pub fn contains(&self, position: Position) -> bool {
        self.lookup.contains_key(&position)
    }

    /// Whether a block of exactly `material` occupies `position`.
    pub fn contains_of(&self, position: Position, material: MaterialKind) -> bool {
        self.try_get_material(position) == Some(material)
    }

    /// The block at `position`, if any.
    pub fn try_get(&self, position: Position) -> Option<Block> {
        self.try_get_material(position)
            .map(|material| Block::new(position, material))
    }

    /// The material of the block at `position`, if any.
    pub fn try_get_material(&self, position: Position) -> Option<MaterialKind> {
        self.lookup
            .get(&position)
            .map(|slot| self.groups[slot.group].material)
    }

    /// Total number of stored blocks.
    pub fn block_count(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the registry holds no blocks at all.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Number of blocks of `material`.
    pub fn group_len(&self, material: MaterialKind) -> usize {
        self.group_index(material)
            .map_or(0, |group| self.groups[group].len())
    }

    /// Iterates over the groups in first-seen material order.
    ///
    /// Groups emptied by removals stay in the sequence with a length of zero.
    pub fn groups(&self) -> impl Iterator<Item = &MaterialGroup> {
        self.groups.iter()
    }

    /// Whether the content changed since the last full emission.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Forces the next emission check to see changed content.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Number of vertices a full emission produces.
    ///
    /// Sum over groups of the per-block vertex count of the group's topology
    /// times the group size.
    pub fn total_vertex_count(&self) -> usize {
        self.groups.iter().map(MaterialGroup::vertex_count).sum()
    }

    /// Appends every block's geometry to `sink` using each group's base tint.
    ///
    /// Clears the dirty flag.
    pub fn emit_vertices<S: Extend<Vertex>>(&mut self, sink: &mut S) {
        self.emit_vertices_with(sink, |_, base| base);
    }

    /// Appends every block's geometry to `sink`, letting `color_override`
    /// choose each block's tint from the block and its group's base tint.
    ///
    /// Groups are visited in first-seen order and blocks in their stable group
    /// order. Clears the dirty flag.
    ///
    /// # Arguments
    /// * `sink` - Destination of the emitted vertices
    /// * `color_override` - Maps `(block, base tint)` to the tint to emit
    pub fn emit_vertices_with<S, F>(&mut self, sink: &mut S, mut color_override: F)
    where
        S: Extend<Vertex>,
        F: FnMut(&Block, Color) -> Color,
    {
        for group in &self.groups {
            let info = group.material.render_info();
            for block in group.blocks() {
                let color = color_override(&block, info.base_color);
                emit_block(info.topology, block.center(), color, sink);
            }
        }
        self.dirty = false;
    }

    fn group_index(&self, material: MaterialKind) -> Option<usize> {
        self.groups.iter().position(|g| g.material == material)
    }

    fn group_index_or_create(&mut self, material: MaterialKind) -> usize {
        match self.group_index(material) {
            Some(group) => group,
            None => {
                self.groups.push(MaterialGroup::new(material));
                self.groups.len() - 1
            }
        }
    }

    /// Unlinks the block at `position` from its group, keeping group storage dense.
    fn take(&mut self, position: Position) -> Option<MaterialKind> {
        let slot = self.lookup.remove(&position)?;
        let group = &mut self.groups[slot.group];
        group.cells.swap_remove(slot.index);
        if let Some(moved) = group.cells.get(slot.index) {
            self.lookup.insert(*moved, slot);
        }
        Some(group.material)
    }
}
