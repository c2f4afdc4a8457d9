//! Shared view over anything that fights

use crate::character::Character;
use crate::enemy::Enemy;
use crate::stat_block;
use item_core::StatusEffect;

/// A combat-capable entity: health, status effects, offense and mitigation
pub trait Combatant: Clone {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn health(&self) -> i32;
    fn max_health(&self) -> i32;
    /// Set health, clamped to `[0, max_health]`
    fn set_health(&mut self, health: i32);
    fn status_effects(&self) -> &[StatusEffect];
    fn status_effects_mut(&mut self) -> &mut Vec<StatusEffect>;
    /// Base damage of a basic attack, before mitigation
    fn attack_power(&self) -> i32;
    /// Flat mitigation against incoming hits
    fn armor_value(&self) -> i32;

    fn is_alive(&self) -> bool {
        self.health() > 0
    }
}

impl Combatant for Character {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health.max(0));
    }

    fn status_effects(&self) -> &[StatusEffect] {
        &self.status_effects
    }

    fn status_effects_mut(&mut self) -> &mut Vec<StatusEffect> {
        &mut self.status_effects
    }

    fn attack_power(&self) -> i32 {
        stat_block::attack_power(self)
    }

    fn armor_value(&self) -> i32 {
        stat_block::total_armor(self)
    }
}

impl Combatant for Enemy {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn health(&self) -> i32 {
        self.health
    }

    fn max_health(&self) -> i32 {
        self.max_health
    }

    fn set_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health.max(0));
    }

    fn status_effects(&self) -> &[StatusEffect] {
        &self.status_effects
    }

    fn status_effects_mut(&mut self) -> &mut Vec<StatusEffect> {
        &mut self.status_effects
    }

    // Stat modifiers do not apply to enemies
    fn attack_power(&self) -> i32 {
        self.damage
    }

    fn armor_value(&self) -> i32 {
        self.armor
    }
}
