//! Spell casting

use crate::character::Character;
use crate::combatant::Combatant;
use crate::config::constants;
use crate::enemy::Enemy;
use crate::error::ActionError;
use crate::stat_block::total_stats;
use item_core::StatusEffect;
use tables_core::{tables, Spell, SpellTarget};
use tracing::{debug, warn};

/// Everything a cast changed
#[derive(Debug, Clone, PartialEq)]
pub struct SpellOutcome {
    /// Caster after mana cost and healing
    pub caster: Character,
    /// Enemies after damage. Defeated enemies stay in the list at 0 health.
    pub enemies: Vec<Enemy>,
    pub mana_spent: i32,
    /// (enemy id, damage) per hit
    pub hits: Vec<(String, i32)>,
    pub healing: i32,
    /// Fresh instance of the spell's status effect, not yet attached
    pub effect: Option<StatusEffect>,
}

/// Cast `spell`, paying its mana cost.
///
/// Damage is `spell.damage + floor((int + wis) / 2)` from total stats and
/// bypasses armor. Single-target spells hit the first living enemy, area
/// spells hit every living enemy for a reduced share. Healing is
/// `spell.healing + floor(wis * 1.5)`, clamped to missing health, and only
/// ever lands on the caster.
pub fn cast_spell(
    caster: &Character,
    spell: &Spell,
    enemies: &[Enemy],
) -> Result<SpellOutcome, ActionError> {
    if caster.mana < spell.mana_cost {
        warn!(spell = %spell.id, mana = caster.mana, cost = spell.mana_cost, "not enough mana");
        return Err(ActionError::InsufficientMana {
            required: spell.mana_cost,
            available: caster.mana,
        });
    }

    let living: Vec<usize> = enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .map(|(i, _)| i)
        .collect();
    if spell.is_damaging() && spell.target != SpellTarget::Caster && living.is_empty() {
        return Err(ActionError::NoTarget);
    }

    let combat = &constants().combat;
    let stats = total_stats(caster);
    let mut next = caster.clone();
    let mut enemies = enemies.to_vec();
    let mut hits = Vec::new();

    next.mana -= spell.mana_cost;

    if let Some(base) = spell.damage {
        let damage = base + (stats.intelligence + stats.wisdom).div_euclid(2);
        let targets: &[usize] = match spell.target {
            SpellTarget::Single => &living[..1.min(living.len())],
            SpellTarget::Area => &living,
            SpellTarget::Caster => &[],
        };
        let per_target = match spell.target {
            SpellTarget::Area => (f64::from(damage) * combat.area_spell_multiplier).floor() as i32,
            _ => damage,
        }
        .max(0);

        for &i in targets {
            let enemy = &mut enemies[i];
            enemy.set_health(enemy.health - per_target);
            hits.push((enemy.id.clone(), per_target));
        }
    }

    let mut healing = 0;
    if let Some(base) = spell.healing {
        let amount = base + (f64::from(stats.wisdom) * combat.heal_wisdom_multiplier).floor() as i32;
        healing = amount.min(next.max_health - next.health).max(0);
        next.health += healing;
    }

    let effect = spell.effect.and_then(|t| tables().status_effect(t));

    debug!(spell = %spell.id, hits = hits.len(), healing, "spell cast");
    Ok(SpellOutcome {
        caster: next,
        enemies,
        mana_spent: spell.mana_cost,
        hits,
        healing,
        effect,
    })
}
