//! stat_core - Character rules for Aethermoor
//!
//! This library provides:
//! - Character: the player model and class-based creation
//! - Progression: experience, levels, stat points, talents, resources
//! - Stat aggregation: total stats, armor and attack from gear and effects
//! - Status effects: ticking, stacking and removal on any combatant
//! - Combat: encounter setup, turn resolution, spells and rewards
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stat_core::prelude::*;
//!
//! let hero = create_character("Eldric", CharacterClass::Mage).unwrap();
//! let enemies = spawn_encounter(&["goblin", "wolf"]);
//!
//! let (hero, state) = initiate_combat(&hero, &enemies, hero.level).unwrap();
//! let outcome = resolve_turn(&hero, &state, CombatAction::CastSpell("fireball".into())).unwrap();
//! for event in &outcome.events {
//!     println!("{}", event);
//! }
//! ```
//!
//! All operations take their inputs by reference and return new values.

pub mod character;
pub mod combat;
pub mod combatant;
pub mod config;
pub mod damage;
pub mod effects;
pub mod enemy;
pub mod error;
pub mod prelude;
pub mod progression;
pub mod stat_block;
pub mod types;

// Core API
pub use character::{create_character, create_character_from, Character};
pub use combatant::Combatant;
pub use enemy::{spawn_encounter, spawn_encounter_from, Enemy};
pub use error::ActionError;
pub use types::{Equipment, EquipmentSlot, TalentChoice};

// Engines
pub use combat::{
    apply_rewards, cast_spell, initiate_combat, resolve_turn, resolve_turn_with_rng,
    victory_rewards, CombatAction, CombatEvent, CombatPhase, CombatState, Rewards, TurnOutcome,
};
pub use damage::{calculate_damage, calculate_damage_with_rng};
pub use effects::{add_status_effect, apply_status_effects, has_effect, remove_status_effect};
pub use progression::{
    add_playtime, choose_talent, gain_experience, heal, level_up, modify_gold, restore_mana,
    spend_mana, spend_stat_point, take_damage, use_item, ItemUse,
};
pub use stat_block::{attack_power, equip_item, total_armor, total_stats, unequip_item};

// Configuration
pub use config::{constants, init_constants, init_constants_default, GameConstants};

// Re-export commonly needed shared types
pub use item_core::{Attribute, Item, Stats, StatusEffect};
pub use tables_core::CharacterClass;
