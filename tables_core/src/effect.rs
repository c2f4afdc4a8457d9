use item_core::{EffectType, StatBonus, StatusEffect};
use serde::{Deserialize, Serialize};

/// Template a fresh status effect is built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectTemplate {
    #[serde(rename = "type")]
    pub effect_type: EffectType,
    pub name: String,
    pub duration: i32,
    #[serde(default)]
    pub damage_per_turn: Option<i32>,
    #[serde(default)]
    pub healing_per_turn: Option<i32>,
    #[serde(default)]
    pub stat_modifier: Option<StatBonus>,
    #[serde(default)]
    pub stackable: bool,
}

impl EffectTemplate {
    /// New instance with a single stack; the id is the effect type's id
    pub fn instantiate(&self) -> StatusEffect {
        StatusEffect {
            id: self.effect_type.id().to_string(),
            name: self.name.clone(),
            effect_type: self.effect_type,
            duration: self.duration,
            damage_per_turn: self.damage_per_turn,
            healing_per_turn: self.healing_per_turn,
            stat_modifier: self.stat_modifier,
            stackable: self.stackable,
            stacks: 1,
        }
    }
}
