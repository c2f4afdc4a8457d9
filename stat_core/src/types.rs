//! Equipment slots and small shared records

use item_core::{Item, ItemType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory1,
    Accessory2,
}

impl EquipmentSlot {
    pub fn all() -> &'static [EquipmentSlot] {
        &[
            EquipmentSlot::Weapon,
            EquipmentSlot::Armor,
            EquipmentSlot::Accessory1,
            EquipmentSlot::Accessory2,
        ]
    }

    /// Item category this slot accepts
    pub fn accepts(&self) -> ItemType {
        match self {
            EquipmentSlot::Weapon => ItemType::Weapon,
            EquipmentSlot::Armor => ItemType::Armor,
            EquipmentSlot::Accessory1 | EquipmentSlot::Accessory2 => ItemType::Misc,
        }
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquipmentSlot::Weapon => write!(f, "weapon"),
            EquipmentSlot::Armor => write!(f, "armor"),
            EquipmentSlot::Accessory1 => write!(f, "first accessory"),
            EquipmentSlot::Accessory2 => write!(f, "second accessory"),
        }
    }
}

/// Equipped items, one per slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weapon: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory1: Option<Item>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessory2: Option<Item>,
}

impl Equipment {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.slot_ref(slot).as_ref()
    }

    fn slot_ref(&self, slot: EquipmentSlot) -> &Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &self.weapon,
            EquipmentSlot::Armor => &self.armor,
            EquipmentSlot::Accessory1 => &self.accessory1,
            EquipmentSlot::Accessory2 => &self.accessory2,
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Accessory1 => &mut self.accessory1,
            EquipmentSlot::Accessory2 => &mut self.accessory2,
        }
    }

    /// Iterate equipped items in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        EquipmentSlot::all().iter().filter_map(move |s| self.get(*s))
    }
}

/// A talent picked by the character and the level it was picked at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TalentChoice {
    pub talent_id: String,
    pub level: u32,
}
