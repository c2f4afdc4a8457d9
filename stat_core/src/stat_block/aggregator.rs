//! Stat aggregation

use crate::character::Character;
use crate::config::constants;
use item_core::Stats;

/// Base stats plus every equipped item's bonus plus every active effect's
/// modifier, per attribute. Uncapped; debuffs may push values negative.
pub fn total_stats(character: &Character) -> Stats {
    let mut total = character.stats;

    for item in character.equipment.iter() {
        if let Some(bonus) = &item.stats {
            total.apply_bonus(bonus);
        }
    }

    for effect in &character.status_effects {
        if let Some(modifier) = &effect.stat_modifier {
            total.apply_bonus(modifier);
        }
    }

    total
}

/// floor(total constitution / 4) plus the armor of every equipped item
pub fn total_armor(character: &Character) -> i32 {
    let divisor = constants().combat.armor_constitution_divisor;
    let from_constitution = total_stats(character).constitution.div_euclid(divisor);
    let from_items: i32 = character.equipment.iter().map(|i| i.armor_value()).sum();
    from_constitution + from_items
}

/// Base damage of a basic attack: floor(total strength / 2) + 5 + weapon damage
pub fn attack_power(character: &Character) -> i32 {
    let combat = &constants().combat;
    let strength = total_stats(character).strength;
    let weapon = character
        .equipment
        .weapon
        .as_ref()
        .map_or(0, |w| w.damage_value());
    strength.div_euclid(combat.strength_divisor) + combat.attack_base + weapon
}
