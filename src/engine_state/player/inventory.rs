//! # Inventory Module
//!
//! The player's block inventory: six item slots with counts and one selected
//! slot. Mining credits the slot of the mined material and putting debits the
//! selected slot.

use std::fmt;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use crate::engine_state::voxels::block::MaterialKind;

/// Number of inventory slots.
pub const SLOT_COUNT: usize = 6;

/// Items the player can carry, in slot order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Places grass.
    GrassBlock = 0,
    /// Places sand.
    SandBlock = 1,
    /// Places stone.
    StoneBlock = 2,
    /// Places oak wood.
    OakWoodBlock = 3,
    /// Places oak leaves.
    OakLeafBlock = 4,
    /// Places glass.
    GlassBlock = 5,
}

impl ItemKind {
    /// The item stored in `slot`, if the slot exists.
    pub fn from_slot(slot: usize) -> Option<Self> {
        num::FromPrimitive::from_usize(slot)
    }

    /// Slot index of this item.
    pub fn slot(self) -> usize {
        self as usize
    }

    /// The block material a put of this item places.
    pub fn material(self) -> MaterialKind {
        match self {
            ItemKind::GrassBlock => MaterialKind::Grass,
            ItemKind::SandBlock => MaterialKind::Sand,
            ItemKind::StoneBlock => MaterialKind::Stone,
            ItemKind::OakWoodBlock => MaterialKind::Wood,
            ItemKind::OakLeafBlock => MaterialKind::Leaf,
            ItemKind::GlassBlock => MaterialKind::Glass,
        }
    }

    /// The item credited for mining a block of `material`.
    ///
    /// Liquids and the preview marker yield no item.
    pub fn from_material(material: MaterialKind) -> Option<Self> {
        match material {
            MaterialKind::Grass => Some(ItemKind::GrassBlock),
            MaterialKind::Sand => Some(ItemKind::SandBlock),
            MaterialKind::Stone => Some(ItemKind::StoneBlock),
            MaterialKind::Wood => Some(ItemKind::OakWoodBlock),
            MaterialKind::Leaf => Some(ItemKind::OakLeafBlock),
            MaterialKind::Glass => Some(ItemKind::GlassBlock),
            MaterialKind::Water | MaterialKind::PutPreview => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.material(), f)
    }
}

/// Item counts per slot plus the selected slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Inventory {
    counts: [u32; SLOT_COUNT],
    selected: usize,
}

impl Inventory {
    /// An empty inventory with the first slot selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `slot`, clamped into the slot range.
    pub fn select(&mut self, slot: i64) {
        self.selected = slot.clamp(0, SLOT_COUNT as i64 - 1) as usize;
    }

    /// Index of the selected slot.
    pub fn selected_slot(&self) -> usize {
        self.selected
    }

    /// The item in the selected slot.
    pub fn selected_item(&self) -> ItemKind {
        ItemKind::from_slot(self.selected).unwrap_or(ItemKind::GrassBlock)
    }

    /// How many of the selected item are held.
    pub fn selected_count(&self) -> u32 {
        self.counts[self.selected]
    }

    /// How many of `item` are held.
    pub fn count(&self, item: ItemKind) -> u32 {
        self.counts[item.slot()]
    }

    /// Adds one `item`.
    pub fn add(&mut self, item: ItemKind) {
        self.counts[item.slot()] = self.counts[item.slot()].saturating_add(1);
    }

    /// Removes one `item`; a slot never drops below zero.
    pub fn remove(&mut self, item: ItemKind) {
        self.counts[item.slot()] = self.counts[item.slot()].saturating_sub(1);
    }

    /// Iterates over every slot as `(item, count)`.
    pub fn slots(&self) -> impl Iterator<Item = (ItemKind, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(slot, count)| ItemKind::from_slot(slot).map(|item| (item, *count)))
    }
}

impl fmt::Display for Inventory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (item, count) in self.slots() {
            let marker = if item.slot() == self.selected { '>' } else { ' ' };
            writeln!(f, "{marker} {item}: {count}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_clamped() {
        let mut inventory = Inventory::new();
        inventory.select(-3);
        assert_eq!(inventory.selected_slot(), 0);
        inventory.select(42);
        assert_eq!(inventory.selected_slot(), SLOT_COUNT - 1);
        assert_eq!(inventory.selected_item(), ItemKind::GlassBlock);
    }

    #[test]
    fn counts_never_go_negative() {
        let mut inventory = Inventory::new();
        inventory.remove(ItemKind::SandBlock);
        assert_eq!(inventory.count(ItemKind::SandBlock), 0);
        inventory.add(ItemKind::SandBlock);
        inventory.add(ItemKind::SandBlock);
        inventory.remove(ItemKind::SandBlock);
        assert_eq!(inventory.count(ItemKind::SandBlock), 1);
    }

    #[test]
    fn grass_item_places_grass() {
        assert_eq!(ItemKind::GrassBlock.material(), MaterialKind::Grass);
        for slot in 0..SLOT_COUNT {
            let item = ItemKind::from_slot(slot).unwrap();
            assert_eq!(ItemKind::from_material(item.material()), Some(item));
        }
        assert_eq!(ItemKind::from_material(MaterialKind::Water), None);
    }
}
