use crate::class::CharacterClass;
use item_core::EffectType;
use serde::{Deserialize, Serialize};

/// Who a spell lands on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellTarget {
    Single,
    Area,
    #[serde(rename = "self")]
    Caster,
}

/// Spell definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub mana_cost: i32,
    #[serde(default)]
    pub damage: Option<i32>,
    #[serde(default)]
    pub healing: Option<i32>,
    /// Status effect applied on cast, instantiated from the effect templates
    #[serde(default)]
    pub effect: Option<EffectType>,
    pub target: SpellTarget,
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
    #[serde(default = "default_level")]
    pub required_level: u32,
    /// Learned only through a talent, never by levelling
    #[serde(default)]
    pub talent_only: bool,
}

fn default_level() -> u32 {
    1
}

impl Spell {
    pub fn usable_by(&self, class: CharacterClass) -> bool {
        self.classes.contains(&class)
    }

    /// Whether levelling alone unlocks this spell for the class at `level`
    pub fn unlocked_at(&self, class: CharacterClass, level: u32) -> bool {
        !self.talent_only && self.usable_by(class) && self.required_level <= level
    }

    pub fn is_damaging(&self) -> bool {
        self.damage.is_some()
    }

    pub fn is_healing(&self) -> bool {
        self.healing.is_some()
    }
}
