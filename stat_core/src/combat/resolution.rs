//! Turn resolution - one player action, then the enemy phase, then upkeep

use super::event::CombatEvent;
use super::rewards::{victory_rewards, Rewards};
use super::spell::cast_spell;
use super::state::{CombatAction, CombatPhase, CombatState};
use crate::character::Character;
use crate::combatant::Combatant;
use crate::config::constants;
use crate::damage::calculate_damage_with_rng;
use crate::effects::{add_status_effect, apply_status_effects, EffectTick};
use crate::enemy::Enemy;
use crate::error::ActionError;
use crate::progression::use_item;
use rand::seq::SliceRandom;
use rand::Rng;
use tables_core::{tables, SpellTarget};
use tracing::{debug, info, warn};

/// Result of one resolved turn
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub character: Character,
    pub state: CombatState,
    pub events: Vec<CombatEvent>,
    /// Set on victory. The caller grants them with `apply_rewards`.
    pub rewards: Option<Rewards>,
}

impl TurnOutcome {
    pub fn phase(&self) -> CombatPhase {
        self.state.phase
    }
}

/// Start an encounter.
///
/// Enemies are scaled to the player's level and stripped of effects. Fails
/// if the character is already fighting or there is nobody to fight.
pub fn initiate_combat(
    character: &Character,
    enemies: &[Enemy],
    player_level: u32,
) -> Result<(Character, CombatState), ActionError> {
    if character.in_combat {
        warn!(character = %character.name, "combat requested while already in combat");
        return Err(ActionError::AlreadyInCombat(character.name.clone()));
    }
    if enemies.is_empty() {
        return Err(ActionError::NoTarget);
    }

    let combat = &constants().combat;
    let scaled: Vec<Enemy> = enemies
        .iter()
        .map(|e| e.scaled(player_level, combat))
        .collect();

    let mut next = character.clone();
    next.in_combat = true;
    let state = CombatState::new(scaled);

    info!(
        character = %character.name,
        enemies = state.enemies.len(),
        player_level,
        "combat started"
    );
    Ok((next, state))
}

/// Resolve one player turn
pub fn resolve_turn(
    character: &Character,
    state: &CombatState,
    action: CombatAction,
) -> Result<TurnOutcome, ActionError> {
    let mut rng = rand::thread_rng();
    resolve_turn_with_rng(character, state, action, &mut rng)
}

/// Resolve one player turn with a provided RNG (for deterministic testing)
///
/// Rejected actions return `Err` and consume no turn.
pub fn resolve_turn_with_rng(
    character: &Character,
    state: &CombatState,
    action: CombatAction,
    rng: &mut impl Rng,
) -> Result<TurnOutcome, ActionError> {
    if !state.is_active {
        return Err(ActionError::CombatOver);
    }
    let kind = action.kind();
    if !state.has_action(kind) {
        return Err(ActionError::ActionUnavailable(format!("{:?}", kind).to_lowercase()));
    }

    let mut turn = Turn {
        character: character.clone(),
        state: state.clone(),
        events: Vec::new(),
    };

    turn.player_action(action, rng)?;
    turn.remove_defeated();

    if turn.state.enemies.is_empty() {
        return Ok(turn.finish(CombatPhase::Victory));
    }

    if !turn.enemy_phase(rng) {
        return Ok(turn.finish(CombatPhase::Defeat));
    }

    turn.upkeep();
    turn.remove_defeated();
    if !turn.character.is_alive() {
        return Ok(turn.finish(CombatPhase::Defeat));
    }
    if turn.state.enemies.is_empty() {
        return Ok(turn.finish(CombatPhase::Victory));
    }

    turn.state.turn_number += 1;
    turn.state.current_turn = 0;
    debug!(turn = turn.state.turn_number, "round complete");
    Ok(TurnOutcome {
        character: turn.character,
        state: turn.state,
        events: turn.events,
        rewards: None,
    })
}

/// Working copy of everything a turn may change
struct Turn {
    character: Character,
    state: CombatState,
    events: Vec<CombatEvent>,
}

impl Turn {
    fn player_action(&mut self, action: CombatAction, rng: &mut impl Rng) -> Result<(), ActionError> {
        match action {
            CombatAction::Attack => {
                let living: Vec<usize> = (0..self.state.enemies.len())
                    .filter(|&i| self.state.enemies[i].is_alive())
                    .collect();
                let &index = living.choose(rng).ok_or(ActionError::NoTarget)?;

                let damage =
                    calculate_damage_with_rng(&self.character, &self.state.enemies[index], false, rng);
                let enemy = &mut self.state.enemies[index];
                enemy.set_health(enemy.health - damage);
                self.events.push(CombatEvent::PlayerAttack {
                    target: enemy.name.clone(),
                    damage,
                });
            }
            CombatAction::Defend => {
                self.state.is_defending = true;
                self.events.push(CombatEvent::Defending);
            }
            CombatAction::CastSpell(spell_id) => self.cast(&spell_id)?,
            CombatAction::UseItem(item) => {
                let used = use_item(&self.character, &item)?;
                self.character = used.character;
                self.events.push(CombatEvent::ItemUsed {
                    item: item.name.clone(),
                    health: used.health_restored,
                    mana: used.mana_restored,
                });
            }
        }
        Ok(())
    }

    fn cast(&mut self, spell_id: &str) -> Result<(), ActionError> {
        let spell = tables()
            .spell(spell_id)
            .ok_or_else(|| ActionError::UnknownSpell(spell_id.to_string()))?;
        if !self.character.knows_spell(spell_id) {
            return Err(ActionError::SpellNotKnown(spell.name.clone()));
        }

        let outcome = cast_spell(&self.character, spell, &self.state.enemies)?;
        self.character = outcome.caster;
        self.state.enemies = outcome.enemies;
        self.events.push(CombatEvent::SpellCast {
            spell: spell.name.clone(),
            mana_spent: outcome.mana_spent,
        });

        for (id, damage) in &outcome.hits {
            if let Some(enemy) = self.state.enemy(id) {
                self.events.push(CombatEvent::SpellHit {
                    target: enemy.name.clone(),
                    damage: *damage,
                });
            }
        }
        if outcome.healing > 0 {
            self.events.push(CombatEvent::Healed {
                amount: outcome.healing,
            });
        }

        if let Some(effect) = outcome.effect {
            match spell.target {
                SpellTarget::Caster => {
                    self.events.push(CombatEvent::EffectApplied {
                        target: self.character.name.clone(),
                        effect: effect.name.clone(),
                    });
                    self.character = add_status_effect(&self.character, effect);
                }
                SpellTarget::Single | SpellTarget::Area => {
                    let count = match spell.target {
                        SpellTarget::Single => 1,
                        _ => usize::MAX,
                    };
                    let targets: Vec<usize> = (0..self.state.enemies.len())
                        .filter(|&i| self.state.enemies[i].is_alive())
                        .take(count)
                        .collect();
                    for i in targets {
                        let enemy = &self.state.enemies[i];
                        self.events.push(CombatEvent::EffectApplied {
                            target: enemy.name.clone(),
                            effect: effect.name.clone(),
                        });
                        self.state.enemies[i] = add_status_effect(enemy, effect.clone());
                    }
                }
            }
        }
        Ok(())
    }

    /// Every living enemy attacks once in roster order. Returns false when
    /// the player falls.
    fn enemy_phase(&mut self, rng: &mut impl Rng) -> bool {
        for i in 0..self.state.enemies.len() {
            let enemy = &self.state.enemies[i];
            if !enemy.is_alive() {
                continue;
            }
            let defended = self.state.is_defending;
            let damage = calculate_damage_with_rng(enemy, &self.character, defended, rng);
            self.state.is_defending = false;

            self.character.set_health(self.character.health - damage);
            self.events.push(CombatEvent::EnemyAttack {
                enemy: enemy.name.clone(),
                damage,
                defended,
            });

            if !self.character.is_alive() {
                return false;
            }
        }
        true
    }

    /// Tick status effects on the player and every enemy
    fn upkeep(&mut self) {
        let (character, tick) = apply_status_effects(&self.character);
        self.character = character;
        let name = self.character.name.clone();
        self.record_tick(&name, tick);

        for i in 0..self.state.enemies.len() {
            let (enemy, tick) = apply_status_effects(&self.state.enemies[i]);
            let name = enemy.name.clone();
            self.state.enemies[i] = enemy;
            self.record_tick(&name, tick);
        }
    }

    fn record_tick(&mut self, target: &str, tick: EffectTick) {
        if tick.damage > 0 || tick.healing > 0 {
            self.events.push(CombatEvent::EffectTick {
                target: target.to_string(),
                damage: tick.damage,
                healing: tick.healing,
            });
        }
        for effect in tick.expired {
            self.events.push(CombatEvent::EffectExpired {
                target: target.to_string(),
                effect,
            });
        }
    }

    fn remove_defeated(&mut self) {
        let events = &mut self.events;
        self.state.enemies.retain(|enemy| {
            if enemy.is_alive() {
                true
            } else {
                debug!(enemy = %enemy.id, "enemy defeated");
                events.push(CombatEvent::EnemyDefeated {
                    enemy: enemy.name.clone(),
                });
                false
            }
        });
    }

    fn finish(mut self, phase: CombatPhase) -> TurnOutcome {
        self.state.is_active = false;
        self.state.is_defending = false;
        self.state.phase = phase;
        self.character.in_combat = false;

        let rewards = match phase {
            CombatPhase::Victory => {
                let rewards = victory_rewards(&self.state.original_enemies);
                info!(
                    character = %self.character.name,
                    experience = rewards.experience,
                    gold = rewards.gold,
                    "combat won"
                );
                self.events.push(CombatEvent::Victory(rewards));
                Some(rewards)
            }
            _ => {
                info!(character = %self.character.name, turn = self.state.turn_number, "combat lost");
                self.events.push(CombatEvent::Defeat);
                None
            }
        };

        TurnOutcome {
            character: self.character,
            state: self.state,
            events: self.events,
            rewards,
        }
    }
}
