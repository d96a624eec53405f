//! Item definitions
//!
//! Core item types, rarities, and the location state an item moves through
//! while it is dragged between the map, the hand, and inventory slots.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geometry::{Camera, ScreenRect};
use crate::render::{Rgb, Surface};

/// Side length of an item icon while slotted or held
pub const ICON_SIZE: f32 = 50.0;

/// Native on-map size of every item image
pub const MAP_IMAGE_SIZE: Vec2 = Vec2::new(100.0, 100.0);

/// Index of an item in the world's item arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub usize);

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Item rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    pub const ALL: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
    ];

    /// Get display color RGB
    pub fn color(&self) -> Rgb {
        match self {
            Rarity::Common => (200, 200, 200),
            Rarity::Uncommon => (100, 255, 100),
            Rarity::Rare => (100, 150, 255),
            Rarity::Epic => (200, 100, 255),
            Rarity::Legendary => (255, 180, 50),
            Rarity::Mythic => (100, 255, 255),
        }
    }

    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        }
    }
}

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Resource,
    Miscellaneous,
}

impl ItemType {
    pub const ALL: [ItemType; 5] = [
        ItemType::Weapon,
        ItemType::Armor,
        ItemType::Consumable,
        ItemType::Resource,
        ItemType::Miscellaneous,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ItemType::Weapon => "Weapon",
            ItemType::Armor => "Armor",
            ItemType::Consumable => "Consumable",
            ItemType::Resource => "Resource",
            ItemType::Miscellaneous => "Miscellaneous",
        }
    }
}

/// Where an item currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ItemLocation {
    /// Lying on the map, drawn at `map_position`
    #[default]
    OnMap,
    /// Occupying an inventory slot, drawn at the slot corner
    InInventory,
    /// Attached to the cursor mid-drag
    InHand,
}

/// Reference to an item sprite
///
/// `key` names the sprite variant (`"<type>/<type name>/<n>"`); `glyph`
/// and `color` are what text-cell surfaces draw in its place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageHandle {
    pub key: String,
    pub size: Vec2,
    pub glyph: char,
    pub color: Rgb,
}

impl ImageHandle {
    pub fn new(key: impl Into<String>, size: Vec2, glyph: char, color: Rgb) -> Self {
        Self {
            key: key.into(),
            size,
            glyph,
            color,
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }
}

/// A world item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Arena index, assigned when the item joins a world
    pub id: ItemId,
    pub name: String,
    pub image: ImageHandle,
    pub description: String,
    pub rarity: Rarity,
    pub item_type: ItemType,
    pub type_name: String,
    pub value: u32,
    location: ItemLocation,
    /// Top-left corner in map space
    pub map_position: Vec2,
    /// Top-left corner in screen space while slotted or held
    pub screen_position: Vec2,
}

impl Item {
    /// Create an item lying on the map
    pub fn new(
        name: impl Into<String>,
        image: ImageHandle,
        description: impl Into<String>,
        rarity: Rarity,
        item_type: ItemType,
        type_name: impl Into<String>,
        value: u32,
        map_position: Vec2,
    ) -> Self {
        Self {
            id: ItemId(0),
            name: name.into(),
            image,
            description: description.into(),
            rarity,
            item_type,
            type_name: type_name.into(),
            value,
            location: ItemLocation::OnMap,
            map_position,
            screen_position: Vec2::ZERO,
        }
    }

    pub fn location(&self) -> ItemLocation {
        self.location
    }

    pub fn is_on_map(&self) -> bool {
        self.location == ItemLocation::OnMap
    }

    pub fn is_in_inventory(&self) -> bool {
        self.location == ItemLocation::InInventory
    }

    pub fn is_in_hand(&self) -> bool {
        self.location == ItemLocation::InHand
    }

    /// Put the item on the map at a map position
    pub fn drop_at(&mut self, map_position: Vec2) {
        self.location = ItemLocation::OnMap;
        self.map_position = map_position;
    }

    /// Attach the item to the cursor
    pub fn take_in_hand(&mut self, pointer: Vec2) {
        self.location = ItemLocation::InHand;
        self.screen_position = pointer;
    }

    /// Anchor the item to a slot corner
    ///
    /// The map position is recomputed from the slot corner so items in
    /// world inventories keep scrolling with the map.
    pub fn settle_in_slot(&mut self, slot_corner: Vec2, camera: &Camera) {
        self.location = ItemLocation::InInventory;
        self.screen_position = slot_corner;
        self.map_position = camera.screen_to_map(slot_corner);
    }

    /// Screen position derived from the map position
    pub fn screen_pos_from_map(&self, camera: &Camera) -> Vec2 {
        camera.map_to_screen(self.map_position)
    }

    /// Map position derived from the screen position
    pub fn map_pos_from_screen(&self, camera: &Camera) -> Vec2 {
        camera.screen_to_map(self.screen_position)
    }

    /// Hit box while lying on the map
    pub fn bounding_box_on_map(&self, camera_position: Vec2) -> ScreenRect {
        ScreenRect::from_pos_size(self.map_position - camera_position, self.image.size)
    }

    /// Hit box while slotted in a world inventory
    pub fn bounding_box_in_inventory(&self, camera: &Camera) -> ScreenRect {
        ScreenRect::from_pos_size(self.screen_pos_from_map(camera), Vec2::splat(ICON_SIZE))
    }

    /// Hit box while slotted in the personal inventory
    pub fn bounding_box_in_personal_inventory(&self) -> ScreenRect {
        ScreenRect::from_pos_size(self.screen_position, Vec2::splat(ICON_SIZE))
    }

    pub fn render_on_map(&self, surface: &mut dyn Surface, camera_position: Vec2) {
        surface.blit(&self.image, self.bounding_box_on_map(camera_position));
    }

    /// Draw the icon with its top-left corner at `corner`
    pub fn render_icon(&self, surface: &mut dyn Surface, corner: Vec2) {
        surface.blit(&self.image, ScreenRect::from_pos_size(corner, Vec2::splat(ICON_SIZE)));
    }

    /// Draw the icon at a screen position
    ///
    /// A held item is centered on `position`, and that centered corner
    /// becomes its screen position.
    pub fn render_on_screen(&mut self, surface: &mut dyn Surface, position: Vec2, held: bool) {
        let corner = if held {
            self.screen_position = position - Vec2::splat(ICON_SIZE / 2.0);
            self.screen_position
        } else {
            position
        };
        self.render_icon(surface, corner);
    }
}
