//! Status effect value type

use crate::types::{EffectType, StatBonus};
use serde::{Deserialize, Serialize};

/// A timed effect attached to a character or enemy
///
/// `id` is the stacking key, `effect_type` the replacement key for
/// non-stackable effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    /// Remaining duration in turns
    pub duration: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_per_turn: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing_per_turn: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat_modifier: Option<StatBonus>,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default = "default_stacks")]
    pub stacks: u32,
}

fn default_stacks() -> u32 {
    1
}

impl StatusEffect {
    /// Create a plain effect with no per-turn or stat component
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        effect_type: EffectType,
        duration: i32,
    ) -> Self {
        StatusEffect {
            id: id.into(),
            name: name.into(),
            effect_type,
            duration,
            damage_per_turn: None,
            healing_per_turn: None,
            stat_modifier: None,
            stackable: false,
            stacks: 1,
        }
    }

    pub fn with_damage(mut self, damage_per_turn: i32) -> Self {
        self.damage_per_turn = Some(damage_per_turn);
        self
    }

    pub fn with_healing(mut self, healing_per_turn: i32) -> Self {
        self.healing_per_turn = Some(healing_per_turn);
        self
    }

    pub fn with_modifier(mut self, modifier: StatBonus) -> Self {
        self.stat_modifier = Some(modifier);
        self
    }

    pub fn stackable(mut self) -> Self {
        self.stackable = true;
        self
    }

    /// Effects are dropped once their duration runs out
    pub fn is_expired(&self) -> bool {
        self.duration <= 0
    }

    pub fn damage(&self) -> i32 {
        self.damage_per_turn.unwrap_or(0)
    }

    pub fn healing(&self) -> i32 {
        self.healing_per_turn.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Attribute;

    #[test]
    fn test_builder() {
        let effect = StatusEffect::new("venom", "Venom", EffectType::Poison, 3)
            .with_damage(4)
            .stackable();

        assert_eq!(effect.damage(), 4);
        assert_eq!(effect.healing(), 0);
        assert!(effect.stackable);
        assert_eq!(effect.stacks, 1);
        assert!(!effect.is_expired());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{
            "id": "war_cry",
            "name": "War Cry",
            "type": "buff_strength",
            "duration": 3,
            "stat_modifier": { "strength": 5 }
        }"#;

        let effect: StatusEffect = serde_json::from_str(json).unwrap();
        assert_eq!(effect.effect_type, EffectType::BuffStrength);
        assert_eq!(effect.stacks, 1);
        assert!(!effect.stackable);
        assert_eq!(
            effect.stat_modifier.and_then(|m| m.get(Attribute::Strength)),
            Some(5)
        );
    }
}
