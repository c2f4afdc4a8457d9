//! Prelude module for convenient imports
//!
//! ```rust
//! use stat_core::prelude::*;
//! ```

// Core types
pub use crate::character::{create_character, Character};
pub use crate::enemy::{spawn_encounter, Enemy};
pub use crate::error::ActionError;
pub use crate::types::EquipmentSlot;

// Engines
pub use crate::combat::{
    apply_rewards, initiate_combat, resolve_turn, CombatAction, CombatEvent, CombatPhase,
    CombatState,
};
pub use crate::progression::{gain_experience, spend_stat_point, use_item};
pub use crate::stat_block::{equip_item, total_stats, unequip_item};

// Shared data types
pub use item_core::{Attribute, Inventory, Item, StatusEffect};
pub use tables_core::CharacterClass;
