//! item_core - value types shared by every rules crate
//!
//! - `Stats` / `StatBonus`: full and partial ability-score vectors
//! - `Item`, `ItemType`, `Rarity`: item templates and inventory entries
//! - `Inventory`: stack-merging item list
//! - `StatusEffect`, `EffectType`: timed effects on combatants

pub mod effect;
pub mod inventory;
pub mod item;
pub mod types;

pub use effect::StatusEffect;
pub use inventory::Inventory;
pub use item::Item;
pub use types::{Attribute, EffectType, ItemType, Rarity, StatBonus, Stats};
