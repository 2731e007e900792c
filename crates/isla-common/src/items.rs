//! Item identities and categories.
//!
//! The island's item set is closed, so items are identified by a
//! plain enum rather than interned IDs. Display names and categories
//! are derived, not stored.

use serde::{Deserialize, Serialize};

/// Broad item classification, used by the UI layer and by
/// consumption rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Raw material gathered from the world
    Resource,
    /// Crafted tool
    Tool,
    /// Crafted weapon
    Weapon,
    /// Edible item
    Food,
    /// One-shot consumable with an effect on use
    Consumable,
}

/// Every item that can exist in an inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    /// Gathered from palm trees
    Wood,
    /// Gathered from rocks
    Stone,
    /// Dropped by defeated enemies
    Meat,
    /// Dropped by defeated enemies
    Hide,
    /// Dropped by defeated enemies
    Fang,
    /// Crafted harvesting tool
    StoneAxe,
    /// Crafted weapon
    Spear,
    /// Healing consumable
    Bandage,
}

impl ItemKind {
    /// Health restored when a consumable of this kind is used.
    ///
    /// Non-consumables restore nothing. All current consumables
    /// restore a flat 20.
    pub const CONSUMABLE_HEAL: i32 = 20;

    /// Display name for UI layers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Stone => "Stone",
            Self::Meat => "Meat",
            Self::Hide => "Hide",
            Self::Fang => "Fang",
            Self::StoneAxe => "Stone Axe",
            Self::Spear => "Spear",
            Self::Bandage => "Bandage",
        }
    }

    /// Category of this item.
    #[must_use]
    pub const fn category(self) -> ItemCategory {
        match self {
            Self::Wood | Self::Stone | Self::Hide | Self::Fang => ItemCategory::Resource,
            Self::Meat => ItemCategory::Food,
            Self::StoneAxe => ItemCategory::Tool,
            Self::Spear => ItemCategory::Weapon,
            Self::Bandage => ItemCategory::Consumable,
        }
    }

    /// Health restored when this item is consumed, or `None` if it
    /// is not consumable.
    #[must_use]
    pub const fn health_restored(self) -> Option<i32> {
        match self.category() {
            ItemCategory::Food | ItemCategory::Consumable => Some(Self::CONSUMABLE_HEAL),
            _ => None,
        }
    }
}

/// The two raw resources harvestable from world nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    /// Palm trees yield wood.
    Wood,
    /// Rocks yield stone.
    Stone,
}

impl ResourceKind {
    /// The inventory item this resource yields.
    #[must_use]
    pub const fn item(self) -> ItemKind {
        match self {
            Self::Wood => ItemKind::Wood,
            Self::Stone => ItemKind::Stone,
        }
    }
}
