use crate::class::CharacterClass;
use item_core::StatBonus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TalentTree {
    Left,
    Middle,
    Right,
}

/// Value attached to a passive ability flag
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PassiveValue {
    Flag(bool),
    Number(f64),
}

/// What choosing a talent does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum TalentEffect {
    /// Permanent addition to base stats
    StatBoost(StatBonus),
    /// Adds a spell id to the known spells
    UnlockSpell(String),
    /// Named passive flags, recorded but not interpreted by the rules engine
    PassiveAbility(BTreeMap<String, PassiveValue>),
    /// Damage multiplier, recorded but not interpreted by the rules engine
    DamageModifier(f64),
}

/// Talent definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talent {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub class: CharacterClass,
    pub required_level: u32,
    pub tree: TalentTree,
    pub tier: u8,
    /// Talent ids that must already be chosen
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub effects: Vec<TalentEffect>,
}

impl Talent {
    /// Level met, not yet chosen, every prerequisite chosen
    pub fn is_available(&self, level: u32, chosen: &[String]) -> bool {
        self.required_level <= level
            && !chosen.iter().any(|c| c == &self.id)
            && self.requirements.iter().all(|r| chosen.contains(r))
    }

    /// Sum of every stat boost this talent grants
    pub fn stat_boost(&self) -> StatBonus {
        let mut total = StatBonus::default();
        for effect in &self.effects {
            if let TalentEffect::StatBoost(bonus) = effect {
                for (attribute, value) in bonus.iter() {
                    let current = total.get(attribute).unwrap_or(0);
                    total.set(attribute, current + value);
                }
            }
        }
        total
    }

    /// Spell ids unlocked by this talent
    pub fn unlocked_spells(&self) -> impl Iterator<Item = &str> {
        self.effects.iter().filter_map(|e| match e {
            TalentEffect::UnlockSpell(id) => Some(id.as_str()),
            _ => None,
        })
    }
}
