//! # Material Module
//!
//! This module defines the closed set of block materials in the world.
//! It provides material identification, conversion from compact ids, and the
//! liquid/placement properties the world controller relies on.

use std::fmt;

use num_derive::FromPrimitive;
use serde::{Deserialize, Serialize};

use super::MaterialId;

/// Enumerates every kind of block the registry can hold.
///
/// Each variant maps to exactly one render group through the fixed table in
/// `rendering::render_group`. `PutPreview` is the outline marker drawn at the
/// prospective placement cell; it can be stored (the debug scenes fill volumes
/// with it) but it is never a player material.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, FromPrimitive)]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialKind {
    /// Wireframe marker for the put target.
    PutPreview = 1,

    /// A grass block, the default ground cover.
    Grass = 2,

    /// A sand block.
    Sand = 3,

    /// A stone block.
    Stone = 4,

    /// Oak trunk wood, used by tree generation.
    Wood = 5,

    /// Oak leaves. Alpha blended.
    Leaf = 6,

    /// Glass. Alpha blended.
    Glass = 7,

    /// Water. Passable for ground detection and skipped by picking.
    Water = 8,
}

impl MaterialKind {
    /// All materials in id order.
    pub const ALL: [MaterialKind; 8] = [
        MaterialKind::PutPreview,
        MaterialKind::Grass,
        MaterialKind::Sand,
        MaterialKind::Stone,
        MaterialKind::Wood,
        MaterialKind::Leaf,
        MaterialKind::Glass,
        MaterialKind::Water,
    ];

    /// Converts a compact `MaterialId` back into a `MaterialKind`.
    ///
    /// # Arguments
    /// * `id` - The material as a `MaterialId`
    ///
    /// # Returns
    /// The matching `MaterialKind`, or `None` for an id outside the table
    pub fn from_id(id: MaterialId) -> Option<Self> {
        num::FromPrimitive::from_u8(id)
    }

    /// The compact id of this material.
    pub fn id(self) -> MaterialId {
        self as MaterialId
    }

    /// Whether this material behaves as a liquid.
    pub fn is_liquid(self) -> bool {
        matches!(self, MaterialKind::Water)
    }

    /// Whether a player may place this material with a put command.
    pub fn is_placeable(self) -> bool {
        !matches!(self, MaterialKind::PutPreview | MaterialKind::Water)
    }

    /// Picks a random solid, opaque building material.
    ///
    /// Used by the scatter scenes when no material is forced.
    pub fn random_solid(rng: &mut fastrand::Rng) -> Self {
        num::FromPrimitive::from_u8(rng.u8(2..6)).unwrap_or(MaterialKind::Grass)
    }
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialKind::PutPreview => "Put",
            MaterialKind::Grass => "Grass",
            MaterialKind::Sand => "Sand",
            MaterialKind::Stone => "Stone",
            MaterialKind::Wood => "Oak Wood",
            MaterialKind::Leaf => "Oak Leaf",
            MaterialKind::Glass => "Glass",
            MaterialKind::Water => "Water",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_from_id() {
        for material in MaterialKind::ALL {
            assert_eq!(MaterialKind::from_id(material.id()), Some(material));
        }
        assert_eq!(MaterialKind::from_id(0), None);
        assert_eq!(MaterialKind::from_id(9), None);
    }

    #[test]
    fn only_water_is_liquid() {
        let liquids: Vec<_> = MaterialKind::ALL
            .into_iter()
            .filter(|m| m.is_liquid())
            .collect();
        assert_eq!(liquids, vec![MaterialKind::Water]);
    }

    #[test]
    fn random_solid_never_yields_overlay_or_transparent() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..200 {
            let material = MaterialKind::random_solid(&mut rng);
            assert!(matches!(
                material,
                MaterialKind::Grass | MaterialKind::Sand | MaterialKind::Stone | MaterialKind::Wood
            ));
        }
    }
}
