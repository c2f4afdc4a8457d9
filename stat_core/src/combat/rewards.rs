//! Victory rewards

use crate::character::Character;
use crate::config::constants;
use crate::enemy::Enemy;
use crate::progression::{gain_experience, modify_gold};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    pub experience: u32,
    pub gold: u32,
}

/// Experience and gold for defeating a roster, by enemy level
pub fn victory_rewards(enemies: &[Enemy]) -> Rewards {
    let combat = &constants().combat;
    enemies.iter().fold(Rewards::default(), |acc, enemy| Rewards {
        experience: acc
            .experience
            .saturating_add(enemy.level.saturating_mul(combat.xp_per_enemy_level)),
        gold: acc
            .gold
            .saturating_add(enemy.level.saturating_mul(combat.gold_per_enemy_level)),
    })
}

/// Grant rewards through the progression engine
pub fn apply_rewards(character: &Character, rewards: &Rewards) -> Character {
    let next = gain_experience(character, rewards.experience);
    modify_gold(&next, i64::from(rewards.gold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::create_character;
    use tables_core::CharacterClass;

    #[test]
    fn test_rewards_by_level() {
        let roster = vec![
            Enemy::new("spider_1", "Forest Spider", 35, 8, 2, 3),
            Enemy::new("spider_2", "Forest Spider", 35, 8, 2, 3),
        ];
        assert_eq!(
            victory_rewards(&roster),
            Rewards {
                experience: 60,
                gold: 30
            }
        );
        assert_eq!(victory_rewards(&[]), Rewards::default());
    }

    #[test]
    fn test_apply_rewards_levels_up() {
        let rogue = create_character("Raven", CharacterClass::Rogue).unwrap();
        let rewarded = apply_rewards(
            &rogue,
            &Rewards {
                experience: 120,
                gold: 40,
            },
        );
        assert_eq!(rewarded.level, 2);
        assert_eq!(rewarded.experience, 20);
        assert_eq!(rewarded.gold, 165);
    }
}
