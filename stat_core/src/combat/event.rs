//! Combat log events

use super::Rewards;
use std::fmt;

/// One thing that happened during a turn, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerAttack { target: String, damage: i32 },
    Defending,
    SpellCast { spell: String, mana_spent: i32 },
    SpellHit { target: String, damage: i32 },
    Healed { amount: i32 },
    EffectApplied { target: String, effect: String },
    ItemUsed { item: String, health: i32, mana: i32 },
    EnemyAttack { enemy: String, damage: i32, defended: bool },
    EffectTick { target: String, damage: i32, healing: i32 },
    EffectExpired { target: String, effect: String },
    EnemyDefeated { enemy: String },
    Victory(Rewards),
    Defeat,
}

impl fmt::Display for CombatEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatEvent::PlayerAttack { target, damage } => {
                write!(f, "You attack {} for {} damage!", target, damage)
            }
            CombatEvent::Defending => write!(f, "You brace yourself for the next attack."),
            CombatEvent::SpellCast { spell, mana_spent } => {
                write!(f, "You cast {} ({} mana).", spell, mana_spent)
            }
            CombatEvent::SpellHit { target, damage } => {
                write!(f, "{} takes {} damage!", target, damage)
            }
            CombatEvent::Healed { amount } => write!(f, "You recover {} health.", amount),
            CombatEvent::EffectApplied { target, effect } => {
                write!(f, "{} is affected by {}.", target, effect)
            }
            CombatEvent::ItemUsed { item, health, mana } => {
                write!(f, "You use {}.", item)?;
                if *health > 0 {
                    write!(f, " Restored {} health.", health)?;
                }
                if *mana > 0 {
                    write!(f, " Restored {} mana.", mana)?;
                }
                Ok(())
            }
            CombatEvent::EnemyAttack {
                enemy,
                damage,
                defended,
            } => {
                write!(f, "{} attacks you for {} damage!", enemy, damage)?;
                if *defended {
                    write!(f, " Your guard softens the blow.")?;
                }
                Ok(())
            }
            CombatEvent::EffectTick {
                target,
                damage,
                healing,
            } => match (*damage > 0, *healing > 0) {
                (true, true) => write!(
                    f,
                    "{} takes {} damage and recovers {} health from lingering effects.",
                    target, damage, healing
                ),
                (true, false) => write!(f, "{} takes {} damage from lingering effects.", target, damage),
                _ => write!(f, "{} recovers {} health.", target, healing),
            },
            CombatEvent::EffectExpired { target, effect } => {
                write!(f, "{} on {} wears off.", effect, target)
            }
            CombatEvent::EnemyDefeated { enemy } => write!(f, "{} is defeated!", enemy),
            CombatEvent::Victory(rewards) => write!(
                f,
                "Victory! You gain {} experience and {} gold.",
                rewards.experience, rewards.gold
            ),
            CombatEvent::Defeat => write!(f, "You have been defeated..."),
        }
    }
}
