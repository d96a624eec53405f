//! Item catalog for data-driven item generation
//!
//! Describes which rarities, types and type names exist, what each
//! rarity is worth, and how many sprite variants each type name has.

use serde::{Deserialize, Serialize};
use crate::items::{ItemType, Rarity};

/// Value table for one rarity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RarityDef {
    pub rarity: Rarity,
    /// Possible values, one is picked at random
    pub values: Vec<u32>,
}

/// A concrete kind of item within a type (Sword, Helmet, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeNameDef {
    pub name: String,
    /// Number of sprite variants available for this name
    pub image_variants: u8,
}

/// The type names available for one item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTypeDef {
    pub item_type: ItemType,
    pub names: Vec<TypeNameDef>,
}

/// Everything the item factory draws from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemCatalog {
    pub rarities: Vec<RarityDef>,
    pub types: Vec<ItemTypeDef>,
}

impl ItemCatalog {
    /// Value table for a rarity
    pub fn values_for(&self, rarity: Rarity) -> &[u32] {
        self.rarities
            .iter()
            .find(|r| r.rarity == rarity)
            .map(|r| r.values.as_slice())
            .unwrap_or(&[])
    }

    /// Type names for an item type
    pub fn names_for(&self, item_type: ItemType) -> &[TypeNameDef] {
        self.types
            .iter()
            .find(|t| t.item_type == item_type)
            .map(|t| t.names.as_slice())
            .unwrap_or(&[])
    }

    /// Find a type name definition (case-insensitive)
    pub fn type_name(&self, item_type: ItemType, name: &str) -> Option<&TypeNameDef> {
        self.names_for(item_type)
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(name))
    }

    /// Check that every table the factory picks from is non-empty
    pub fn is_usable(&self) -> bool {
        !self.rarities.is_empty()
            && self.rarities.iter().all(|r| !r.values.is_empty())
            && !self.types.is_empty()
            && self.types.iter().all(|t| !t.names.is_empty())
    }
}

impl Default for ItemCatalog {
    fn default() -> Self {
        default_item_catalog()
    }
}

fn names(list: &[(&str, u8)]) -> Vec<TypeNameDef> {
    list.iter()
        .map(|(name, variants)| TypeNameDef {
            name: name.to_string(),
            image_variants: *variants,
        })
        .collect()
}

/// Built-in catalog used when no data file is present
pub fn default_item_catalog() -> ItemCatalog {
    let rarities = vec![
        RarityDef { rarity: Rarity::Common, values: vec![1, 2, 4] },
        RarityDef { rarity: Rarity::Uncommon, values: vec![5, 6, 8] },
        RarityDef { rarity: Rarity::Rare, values: vec![10, 15] },
        RarityDef { rarity: Rarity::Epic, values: vec![20, 25] },
        RarityDef { rarity: Rarity::Legendary, values: vec![30, 40] },
        RarityDef { rarity: Rarity::Mythic, values: vec![50, 75, 100] },
    ];

    let types = vec![
        ItemTypeDef { item_type: ItemType::Weapon, names: names(&[("Sword", 3), ("Axe", 2)]) },
        ItemTypeDef { item_type: ItemType::Armor, names: names(&[("Helmet", 2)]) },
        ItemTypeDef { item_type: ItemType::Consumable, names: names(&[("Potion", 4)]) },
        ItemTypeDef { item_type: ItemType::Resource, names: names(&[("Wood", 2), ("Stone", 2)]) },
        ItemTypeDef { item_type: ItemType::Miscellaneous, names: names(&[("Statue", 1)]) },
    ];

    ItemCatalog { rarities, types }
}
