//! Item factory
//!
//! Builds random or explicitly described items from the item catalog.
//! Both entry points take the same catalog and RNG and never need the
//! player; where the item starts out is decided by whoever adds it to a
//! world.

use glam::Vec2;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::ItemCatalog;
use super::item::{ImageHandle, Item, ItemType, Rarity, MAP_IMAGE_SIZE};

/// Explicit description of an item to build
///
/// Empty `name`/`description` are filled in from rarity, type and type name.
#[derive(Debug, Clone)]
pub struct ItemTemplate {
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub item_type: ItemType,
    pub type_name: String,
    pub value: u32,
}

impl Default for ItemTemplate {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            rarity: Rarity::Common,
            item_type: ItemType::Miscellaneous,
            type_name: "Statue".to_string(),
            value: 1,
        }
    }
}

fn full_name(rarity: Rarity, item_type: ItemType, type_name: &str) -> String {
    format!("{} {} {}", rarity.name(), item_type.name(), type_name)
}

/// Pick one of the sprite variants for a type name
pub fn choose_image(
    catalog: &ItemCatalog,
    rarity: Rarity,
    item_type: ItemType,
    type_name: &str,
    rng: &mut impl Rng,
) -> ImageHandle {
    let variants = catalog
        .type_name(item_type, type_name)
        .map(|def| def.image_variants.max(1))
        .unwrap_or(1);
    let variant = rng.gen_range(0..variants);

    let key = format!(
        "{}/{}/{}",
        item_type.name().to_lowercase(),
        type_name.to_lowercase(),
        variant
    );
    let glyph = type_name.chars().next().unwrap_or('?');

    ImageHandle::new(key, MAP_IMAGE_SIZE, glyph, rarity.color())
}

/// Create a fully random item lying at `map_position`
///
/// Returns `None` when the catalog has an empty table to pick from.
pub fn create_random_item(catalog: &ItemCatalog, map_position: Vec2, rng: &mut impl Rng) -> Option<Item> {
    let rarity = *Rarity::ALL.choose(rng)?;
    let item_type = *ItemType::ALL.choose(rng)?;
    let type_name = catalog.names_for(item_type).choose(rng)?.name.clone();
    let value = *catalog.values_for(rarity).choose(rng)?;

    let name = full_name(rarity, item_type, &type_name);
    let description = format!("This is a {}.", name);
    let image = choose_image(catalog, rarity, item_type, &type_name, rng);

    Some(Item::new(name, image, description, rarity, item_type, type_name, value, map_position))
}

/// Create a specific item lying at `map_position`
///
/// Only the sprite variant is random.
pub fn create_item(catalog: &ItemCatalog, template: ItemTemplate, map_position: Vec2, rng: &mut impl Rng) -> Item {
    let ItemTemplate { mut name, mut description, rarity, item_type, type_name, value } = template;

    if name.is_empty() {
        name = full_name(rarity, item_type, &type_name);
    }
    if description.is_empty() {
        description = format!("This is a {}.", full_name(rarity, item_type, &type_name));
    }

    let image = choose_image(catalog, rarity, item_type, &type_name, rng);
    Item::new(name, image, description, rarity, item_type, type_name, value, map_position)
}
