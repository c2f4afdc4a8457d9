//! Status effect subsystem
//!
//! Ticking, stacking and removal of timed effects on any [`Combatant`].

use crate::combatant::Combatant;
use item_core::{EffectType, StatusEffect};
use tracing::debug;

/// What one upkeep tick did to an entity
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectTick {
    pub damage: i32,
    pub healing: i32,
    /// Ids of effects that ran out this tick
    pub expired: Vec<String>,
}

impl EffectTick {
    pub fn is_empty(&self) -> bool {
        self.damage == 0 && self.healing == 0 && self.expired.is_empty()
    }
}

/// Run one tick of every active effect, in insertion order.
///
/// Each effect deals its damage (health floors at 0) then its healing
/// (health caps at max). Afterwards every duration drops by one and
/// effects at or below zero are removed.
pub fn apply_status_effects<C: Combatant>(entity: &C) -> (C, EffectTick) {
    let mut next = entity.clone();
    let mut tick = EffectTick::default();

    let effects = next.status_effects().to_vec();
    for effect in &effects {
        let damage = effect.damage();
        if damage > 0 {
            let before = next.health();
            next.set_health(before - damage);
            tick.damage += before - next.health();
        }

        let healing = effect.healing();
        if healing > 0 {
            let before = next.health();
            next.set_health(before + healing);
            tick.healing += next.health() - before;
        }
    }

    let remaining = next.status_effects_mut();
    for effect in remaining.iter_mut() {
        effect.duration -= 1;
    }
    remaining.retain(|effect| {
        if effect.is_expired() {
            tick.expired.push(effect.id.clone());
            false
        } else {
            true
        }
    });

    if !tick.is_empty() {
        debug!(
            entity = next.id(),
            damage = tick.damage,
            healing = tick.healing,
            expired = tick.expired.len(),
            "status effects ticked"
        );
    }
    (next, tick)
}

/// Attach an effect.
///
/// A stackable effect whose id is already present bumps that entry's stack
/// count. Otherwise any effect of the same type is replaced.
pub fn add_status_effect<C: Combatant>(entity: &C, effect: StatusEffect) -> C {
    let mut next = entity.clone();
    let effects = next.status_effects_mut();

    if effect.stackable {
        if let Some(existing) = effects.iter_mut().find(|e| e.id == effect.id) {
            existing.stacks += 1;
            return next;
        }
    } else {
        effects.retain(|e| e.effect_type != effect.effect_type);
    }

    effects.push(effect);
    next
}

/// Drop every effect with the given id
pub fn remove_status_effect<C: Combatant>(entity: &C, effect_id: &str) -> C {
    let mut next = entity.clone();
    next.status_effects_mut().retain(|e| e.id != effect_id);
    next
}

pub fn has_effect<C: Combatant>(entity: &C, effect_type: EffectType) -> bool {
    entity
        .status_effects()
        .iter()
        .any(|e| e.effect_type == effect_type)
}
