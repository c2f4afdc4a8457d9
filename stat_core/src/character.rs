//! Player character model and creation

use crate::config::constants;
use crate::error::ActionError;
use crate::types::{Equipment, TalentChoice};
use chrono::{DateTime, Utc};
use item_core::{StatusEffect, Stats};
use serde::{Deserialize, Serialize};
use tables_core::{tables, CharacterClass, GameTables};
use tracing::info;
use uuid::Uuid;

/// The player character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: u32,
    /// Base stats, before equipment and effects
    pub stats: Stats,
    pub health: i32,
    pub max_health: i32,
    pub mana: i32,
    pub max_mana: i32,
    pub gold: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub equipment: Equipment,
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
    /// Spell ids, without duplicates, in learning order
    #[serde(default)]
    pub known_spells: Vec<String>,
    #[serde(default)]
    pub talents: Vec<TalentChoice>,
    #[serde(default)]
    pub stat_points: u32,
    #[serde(default)]
    pub playtime_secs: u64,
    /// Set while an encounter is running for this character
    #[serde(default)]
    pub in_combat: bool,
}

impl Character {
    pub fn knows_spell(&self, spell_id: &str) -> bool {
        self.known_spells.iter().any(|s| s == spell_id)
    }

    /// Add a spell id unless already known
    pub(crate) fn learn_spell(&mut self, spell_id: &str) {
        if !self.knows_spell(spell_id) {
            self.known_spells.push(spell_id.to_string());
        }
    }

    pub fn has_talent(&self, talent_id: &str) -> bool {
        self.talents.iter().any(|t| t.talent_id == talent_id)
    }

    /// Chosen talent ids
    pub fn talent_ids(&self) -> Vec<String> {
        self.talents.iter().map(|t| t.talent_id.clone()).collect()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Experience still needed for the next level
    pub fn experience_to_next_level(&self) -> u32 {
        constants()
            .progression
            .threshold(self.level)
            .saturating_sub(self.experience)
    }
}

/// Create a level 1 character of the given class from the global tables
pub fn create_character(name: &str, class: CharacterClass) -> Result<Character, ActionError> {
    create_character_from(tables(), name, class)
}

/// Create a level 1 character using an explicit set of tables
pub fn create_character_from(
    tables: &GameTables,
    name: &str,
    class: CharacterClass,
) -> Result<Character, ActionError> {
    let def = tables
        .class(class)
        .ok_or_else(|| ActionError::UnknownClass(class.to_string()))?;
    let progression = &constants().progression;

    let max_health = progression.max_health(def.base_stats.constitution);
    let max_mana = progression.max_mana(def.base_stats.intelligence);
    let known_spells = tables
        .available_spells(class, 1)
        .into_iter()
        .map(|s| s.id.clone())
        .collect();

    let character = Character {
        id: format!("char_{}", Uuid::new_v4().simple()),
        name: name.to_string(),
        class,
        level: 1,
        experience: 0,
        stats: def.base_stats,
        health: max_health,
        max_health,
        mana: max_mana,
        max_mana,
        gold: def.starting_gold,
        created_at: Utc::now(),
        equipment: Equipment::default(),
        status_effects: Vec::new(),
        known_spells,
        talents: Vec::new(),
        stat_points: 0,
        playtime_secs: 0,
        in_combat: false,
    };

    info!(id = %character.id, name, class = %class, "character created");
    Ok(character)
}
