use item_core::Stats;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playable character archetypes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

impl CharacterClass {
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Warrior,
            CharacterClass::Mage,
            CharacterClass::Rogue,
            CharacterClass::Cleric,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "warrior",
            CharacterClass::Mage => "mage",
            CharacterClass::Rogue => "rogue",
            CharacterClass::Cleric => "cleric",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacterClass::Warrior => write!(f, "Warrior"),
            CharacterClass::Mage => write!(f, "Mage"),
            CharacterClass::Rogue => write!(f, "Rogue"),
            CharacterClass::Cleric => write!(f, "Cleric"),
        }
    }
}

/// Class definition: starting values and per-level growth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    pub class: CharacterClass,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_stats: Stats,
    /// Added to base stats on every level-up
    pub per_level: Stats,
    pub starting_gold: u32,
    /// Catalogue ids of the starting equipment
    #[serde(default)]
    pub starting_items: Vec<String>,
    #[serde(default)]
    pub starting_names: Vec<String>,
}

impl ClassDef {
    /// Pick a name suggestion for character creation
    pub fn random_name<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        self.starting_names.choose(rng).map(|s| s.as_str())
    }
}
