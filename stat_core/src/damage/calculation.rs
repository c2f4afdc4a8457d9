//! Damage calculation - one formula for every attacker/defender pair

use crate::combatant::Combatant;
use crate::config::constants;
use rand::Rng;

/// Damage of one basic hit from `attacker` on `defender`
pub fn calculate_damage<A: Combatant, D: Combatant>(
    attacker: &A,
    defender: &D,
    defending: bool,
) -> i32 {
    let mut rng = rand::thread_rng();
    calculate_damage_with_rng(attacker, defender, defending, &mut rng)
}

/// Calculate damage with a provided RNG (for deterministic testing)
///
/// `max(min_damage, attack_power - mitigation) + U[0, max_damage_bonus]`
pub fn calculate_damage_with_rng<A: Combatant, D: Combatant>(
    attacker: &A,
    defender: &D,
    defending: bool,
    rng: &mut impl Rng,
) -> i32 {
    let combat = &constants().combat;
    let base = attacker.attack_power();
    let reduced = (base - mitigation(defender, defending)).max(combat.min_damage);
    let bonus = if combat.max_damage_bonus > 0 {
        rng.gen_range(0..=combat.max_damage_bonus)
    } else {
        0
    };
    reduced + bonus
}

/// Defender's armor, scaled up while defending (floored)
pub fn mitigation<D: Combatant>(defender: &D, defending: bool) -> i32 {
    let armor = defender.armor_value();
    if defending {
        (f64::from(armor) * constants().combat.defend_multiplier).floor() as i32
    } else {
        armor
    }
}
