//! Progression engine: experience, levels, stat points, talents, resources
//!
//! Every function takes the character by reference and returns the updated
//! copy. Rejections come back as [`ActionError`] with the input untouched.

use crate::character::Character;
use crate::config::{constants, ProgressionConstants};
use crate::error::ActionError;
use crate::types::TalentChoice;
use item_core::{Attribute, Item, Stats};
use tables_core::tables;
use tracing::{debug, info, warn};

/// Add experience and level up as far as the configured policy allows
pub fn gain_experience(character: &Character, amount: u32) -> Character {
    gain_experience_with(character, amount, &constants().progression)
}

/// Add experience under explicit progression constants.
///
/// With `multi_level_up` the character levels repeatedly while experience
/// covers the current threshold; otherwise at most one level is gained.
pub fn gain_experience_with(
    character: &Character,
    amount: u32,
    progression: &ProgressionConstants,
) -> Character {
    let mut next = character.clone();
    next.experience = next.experience.saturating_add(amount);

    while ready_to_level(&next, progression) {
        next = level_up_with(&next, progression);
        if !progression.multi_level_up {
            break;
        }
    }
    next
}

fn ready_to_level(character: &Character, progression: &ProgressionConstants) -> bool {
    let threshold = progression.threshold(character.level);
    threshold > 0 && character.experience >= threshold
}

/// Advance one level
pub fn level_up(character: &Character) -> Character {
    level_up_with(character, &constants().progression)
}

/// Advance one level under explicit progression constants
pub fn level_up_with(character: &Character, progression: &ProgressionConstants) -> Character {
    let tables = tables();
    let mut next = character.clone();

    let increments = match tables.class(character.class) {
        Some(def) => def.per_level,
        None => {
            warn!(class = %character.class, "no class data, levelling without stat gains");
            Stats::default()
        }
    };

    next.experience = next
        .experience
        .saturating_sub(progression.threshold(character.level));
    next.level += 1;
    next.stats = next.stats + increments;

    let health_gain =
        progression.health_per_constitution * increments.constitution + progression.level_health_bonus;
    let mana_gain = (f64::from(increments.intelligence) * progression.mana_per_intelligence).floor()
        as i32
        + progression.level_mana_bonus;
    next.max_health += health_gain;
    next.health += health_gain;
    next.max_mana += mana_gain;
    next.mana += mana_gain;

    for spell in tables.available_spells(next.class, next.level) {
        if !next.knows_spell(&spell.id) {
            info!(spell = %spell.id, "spell learned");
            next.learn_spell(&spell.id);
        }
    }

    if next.level % progression.stat_point_interval.max(1) == 0 {
        next.stat_points += progression.stat_points_per_interval;
    }

    info!(
        character = %next.name,
        level = next.level,
        max_health = next.max_health,
        max_mana = next.max_mana,
        "level up"
    );
    next
}

/// Spend one unspent stat point on an attribute. No points, no change.
pub fn spend_stat_point(character: &Character, attribute: Attribute) -> Character {
    let mut next = character.clone();
    if next.stat_points == 0 {
        debug!("no stat points to spend");
        return next;
    }
    next.stat_points -= 1;
    *next.stats.get_mut(attribute) += 1;
    next
}

/// Pick a talent: class, level and prerequisites must all be satisfied.
///
/// Stat boosts go to base stats and unlocked spells join the known list.
pub fn choose_talent(character: &Character, talent_id: &str) -> Result<Character, ActionError> {
    let talent = tables()
        .talent(talent_id)
        .ok_or_else(|| ActionError::UnknownTalent(talent_id.to_string()))?;

    if talent.class != character.class
        || !talent.is_available(character.level, &character.talent_ids())
    {
        warn!(talent = talent_id, level = character.level, "talent rejected");
        return Err(ActionError::TalentUnavailable(talent.name.clone()));
    }

    let mut next = character.clone();
    next.stats.apply_bonus(&talent.stat_boost());
    for spell in talent.unlocked_spells() {
        next.learn_spell(spell);
    }
    next.talents.push(TalentChoice {
        talent_id: talent.id.clone(),
        level: character.level,
    });

    info!(talent = %talent.id, level = character.level, "talent chosen");
    Ok(next)
}

/// Lose health, flooring at zero
pub fn take_damage(character: &Character, amount: i32) -> Character {
    let mut next = character.clone();
    next.health = (next.health - amount.max(0)).max(0);
    next
}

/// Regain health, capped at max
pub fn heal(character: &Character, amount: i32) -> Character {
    let mut next = character.clone();
    next.health = (next.health + amount.max(0)).min(next.max_health);
    next
}

pub fn spend_mana(character: &Character, amount: i32) -> Result<Character, ActionError> {
    if character.mana < amount {
        return Err(ActionError::InsufficientMana {
            required: amount,
            available: character.mana,
        });
    }
    let mut next = character.clone();
    next.mana -= amount.max(0);
    Ok(next)
}

pub fn restore_mana(character: &Character, amount: i32) -> Character {
    let mut next = character.clone();
    next.mana = (next.mana + amount.max(0)).min(next.max_mana);
    next
}

/// Add or remove gold; the purse never goes below zero
pub fn modify_gold(character: &Character, delta: i64) -> Character {
    let mut next = character.clone();
    let gold = (i64::from(next.gold) + delta).clamp(0, i64::from(u32::MAX));
    next.gold = gold as u32;
    next
}

pub fn add_playtime(character: &Character, seconds: u64) -> Character {
    let mut next = character.clone();
    next.playtime_secs = next.playtime_secs.saturating_add(seconds);
    next
}

/// Result of consuming an item
#[derive(Debug, Clone, PartialEq)]
pub struct ItemUse {
    pub character: Character,
    pub health_restored: i32,
    pub mana_restored: i32,
}

/// Consume an item on the character. Removing it from the inventory is the
/// caller's job.
///
/// Restoration is clamped to the missing amount. Healing items are refused
/// at full health, mana-only items at full mana.
pub fn use_item(character: &Character, item: &Item) -> Result<ItemUse, ActionError> {
    let healing = item.healing.unwrap_or(0).max(0);
    let mana = item.mana.unwrap_or(0).max(0);

    if !item.is_consumable() || (healing == 0 && mana == 0) {
        return Err(ActionError::ItemNotUsable(item.name.clone()));
    }
    if healing > 0 && character.health >= character.max_health {
        return Err(ActionError::HealthFull);
    }
    if healing == 0 && character.mana >= character.max_mana {
        return Err(ActionError::ManaFull);
    }

    let mut next = character.clone();
    let health_restored = healing.min(next.max_health - next.health).max(0);
    let mana_restored = mana.min(next.max_mana - next.mana).max(0);
    next.health += health_restored;
    next.mana += mana_restored;

    debug!(item = %item.id, health_restored, mana_restored, "item used");
    Ok(ItemUse {
        character: next,
        health_restored,
        mana_restored,
    })
}
