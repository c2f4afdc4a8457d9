//! Save record layout

use crate::achievements::Achievement;
use chrono::{DateTime, Utc};
use item_core::Inventory;
use serde::{Deserialize, Serialize};
use stat_core::{Character, CombatState};
use std::collections::BTreeMap;
use story_core::StoryProgress;
use tables_core::Quest;

/// Current save format version
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to resume a playthrough
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecord {
    /// Save format version for compatibility checking
    pub version: u32,
    pub save_slot: u8,
    pub last_saved: DateTime<Utc>,
    pub character: Character,
    pub inventory: Inventory,
    /// Dialogue position and variables
    pub story: StoryProgress,
    /// Location tag value of the current scene
    #[serde(default)]
    pub current_location: String,
    #[serde(default)]
    pub game_flags: BTreeMap<String, bool>,
    /// Encounter in progress when the game was saved
    #[serde(default)]
    pub combat_state: Option<CombatState>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

/// What a save-slot picker shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSummary {
    pub slot: u8,
    pub character_name: String,
    pub level: u32,
    pub location: String,
    pub playtime_secs: u64,
    pub last_saved: DateTime<Utc>,
}

impl SaveRecord {
    pub fn summary(&self) -> SaveSummary {
        SaveSummary {
            slot: self.save_slot,
            character_name: self.character.name.clone(),
            level: self.character.level,
            location: self.current_location.clone(),
            playtime_secs: self.character.playtime_secs,
            last_saved: self.last_saved,
        }
    }
}
