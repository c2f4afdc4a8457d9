//! Game constants configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

use super::ConfigError;

/// Global game constants instance
static GAME_CONSTANTS: OnceLock<GameConstants> = OnceLock::new();

/// Initialize the global game constants from a TOML file
///
/// Call once at startup, before any rules function runs. Returns an error if
/// already initialized or if loading fails.
pub fn init_constants(path: &Path) -> Result<(), ConfigError> {
    let constants = GameConstants::load_from_path(path)?;
    constants.validate()?;
    GAME_CONSTANTS
        .set(constants)
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Initialize the global game constants with default values
pub fn init_constants_default() -> Result<(), ConfigError> {
    GAME_CONSTANTS
        .set(GameConstants::default())
        .map_err(|_| ConfigError::ValidationError("GameConstants already initialized".to_string()))
}

/// Get a reference to the global game constants
///
/// Falls back to the defaults if nothing was initialized.
pub fn constants() -> &'static GameConstants {
    GAME_CONSTANTS.get_or_init(GameConstants::default)
}

/// Check if constants have been initialized
pub fn constants_initialized() -> bool {
    GAME_CONSTANTS.get().is_some()
}

/// Parse constants from a TOML string (returns the value, doesn't set global)
pub fn parse_constants(toml: &str) -> Result<GameConstants, ConfigError> {
    let constants: GameConstants = super::parse_toml(toml)?;
    constants.validate()?;
    Ok(constants)
}

/// Tunable game constants
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub progression: ProgressionConstants,
    #[serde(default)]
    pub combat: CombatConstants,
}

impl GameConstants {
    /// Load constants from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        super::load_toml(path)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.progression.xp_per_level == 0 {
            return Err(ConfigError::ValidationError(
                "progression.xp_per_level must be positive".to_string(),
            ));
        }
        if self.progression.stat_point_interval == 0 {
            return Err(ConfigError::ValidationError(
                "progression.stat_point_interval must be positive".to_string(),
            ));
        }
        if self.combat.strength_divisor <= 0 || self.combat.armor_constitution_divisor <= 0 {
            return Err(ConfigError::ValidationError(
                "combat divisors must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressionConstants {
    /// Experience threshold per level: threshold = level * xp_per_level
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,
    #[serde(default = "default_base_health")]
    pub base_health: i32,
    #[serde(default = "default_health_per_constitution")]
    pub health_per_constitution: i32,
    #[serde(default = "default_base_mana")]
    pub base_mana: i32,
    /// Max mana per intelligence point (floored)
    #[serde(default = "default_mana_per_intelligence")]
    pub mana_per_intelligence: f64,
    /// Flat health added on every level-up
    #[serde(default = "default_level_health_bonus")]
    pub level_health_bonus: i32,
    /// Flat mana added on every level-up
    #[serde(default = "default_level_mana_bonus")]
    pub level_mana_bonus: i32,
    /// Every Nth level grants stat points
    #[serde(default = "default_stat_point_interval")]
    pub stat_point_interval: u32,
    #[serde(default = "default_stat_points_per_interval")]
    pub stat_points_per_interval: u32,
    /// Keep levelling while experience covers the next threshold.
    /// When false, one call to gain experience levels up at most once.
    #[serde(default = "default_multi_level_up")]
    pub multi_level_up: bool,
}

impl Default for ProgressionConstants {
    fn default() -> Self {
        ProgressionConstants {
            xp_per_level: default_xp_per_level(),
            base_health: default_base_health(),
            health_per_constitution: default_health_per_constitution(),
            base_mana: default_base_mana(),
            mana_per_intelligence: default_mana_per_intelligence(),
            level_health_bonus: default_level_health_bonus(),
            level_mana_bonus: default_level_mana_bonus(),
            stat_point_interval: default_stat_point_interval(),
            stat_points_per_interval: default_stat_points_per_interval(),
            multi_level_up: default_multi_level_up(),
        }
    }
}

impl ProgressionConstants {
    /// Experience required to complete `level`
    pub fn threshold(&self, level: u32) -> u32 {
        level.saturating_mul(self.xp_per_level)
    }

    pub fn max_health(&self, constitution: i32) -> i32 {
        self.base_health + self.health_per_constitution * constitution
    }

    pub fn max_mana(&self, intelligence: i32) -> i32 {
        self.base_mana + (f64::from(intelligence) * self.mana_per_intelligence).floor() as i32
    }
}

fn default_xp_per_level() -> u32 {
    100
}
fn default_base_health() -> i32 {
    20
}
fn default_health_per_constitution() -> i32 {
    2
}
fn default_base_mana() -> i32 {
    10
}
fn default_mana_per_intelligence() -> f64 {
    1.5
}
fn default_level_health_bonus() -> i32 {
    5
}
fn default_level_mana_bonus() -> i32 {
    3
}
fn default_stat_point_interval() -> u32 {
    5
}
fn default_stat_points_per_interval() -> u32 {
    2
}
fn default_multi_level_up() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatConstants {
    /// Character attack power: strength / strength_divisor + attack_base + weapon
    #[serde(default = "default_attack_base")]
    pub attack_base: i32,
    #[serde(default = "default_strength_divisor")]
    pub strength_divisor: i32,
    /// Character armor: constitution / armor_constitution_divisor + items
    #[serde(default = "default_armor_constitution_divisor")]
    pub armor_constitution_divisor: i32,
    /// Mitigation multiplier while defending
    #[serde(default = "default_defend_multiplier")]
    pub defend_multiplier: f64,
    #[serde(default = "default_min_damage")]
    pub min_damage: i32,
    /// Uniform bonus in [0, max_damage_bonus] added to every hit
    #[serde(default = "default_max_damage_bonus")]
    pub max_damage_bonus: i32,
    /// Enemy scaling per player level above 1
    #[serde(default = "default_health_scaling")]
    pub health_scaling: f64,
    #[serde(default = "default_damage_scaling")]
    pub damage_scaling: f64,
    #[serde(default = "default_armor_scaling")]
    pub armor_scaling: f64,
    /// Fraction of spell damage each enemy takes from an area spell
    #[serde(default = "default_area_spell_multiplier")]
    pub area_spell_multiplier: f64,
    /// Healing spell bonus per wisdom point (floored)
    #[serde(default = "default_heal_wisdom_multiplier")]
    pub heal_wisdom_multiplier: f64,
    #[serde(default = "default_xp_per_enemy_level")]
    pub xp_per_enemy_level: u32,
    #[serde(default = "default_gold_per_enemy_level")]
    pub gold_per_enemy_level: u32,
}

impl Default for CombatConstants {
    fn default() -> Self {
        CombatConstants {
            attack_base: default_attack_base(),
            strength_divisor: default_strength_divisor(),
            armor_constitution_divisor: default_armor_constitution_divisor(),
            defend_multiplier: default_defend_multiplier(),
            min_damage: default_min_damage(),
            max_damage_bonus: default_max_damage_bonus(),
            health_scaling: default_health_scaling(),
            damage_scaling: default_damage_scaling(),
            armor_scaling: default_armor_scaling(),
            area_spell_multiplier: default_area_spell_multiplier(),
            heal_wisdom_multiplier: default_heal_wisdom_multiplier(),
            xp_per_enemy_level: default_xp_per_enemy_level(),
            gold_per_enemy_level: default_gold_per_enemy_level(),
        }
    }
}

fn default_attack_base() -> i32 {
    5
}
fn default_strength_divisor() -> i32 {
    2
}
fn default_armor_constitution_divisor() -> i32 {
    4
}
fn default_defend_multiplier() -> f64 {
    1.5
}
fn default_min_damage() -> i32 {
    1
}
fn default_max_damage_bonus() -> i32 {
    2
}
fn default_health_scaling() -> f64 {
    0.2
}
fn default_damage_scaling() -> f64 {
    0.15
}
fn default_armor_scaling() -> f64 {
    0.1
}
fn default_area_spell_multiplier() -> f64 {
    0.8
}
fn default_heal_wisdom_multiplier() -> f64 {
    1.5
}
fn default_xp_per_enemy_level() -> u32 {
    10
}
fn default_gold_per_enemy_level() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert_eq!(constants.progression.threshold(3), 300);
        assert_eq!(constants.progression.max_health(15), 50);
        assert_eq!(constants.progression.max_mana(16), 34);
        assert!(constants.progression.multi_level_up);
        assert!((constants.combat.defend_multiplier - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_partial_constants() {
        let toml = r#"
[progression]
multi_level_up = false
xp_per_level = 50

[combat]
max_damage_bonus = 0
"#;

        let constants = parse_constants(toml).unwrap();
        assert!(!constants.progression.multi_level_up);
        assert_eq!(constants.progression.threshold(2), 100);
        assert_eq!(constants.progression.base_health, 20);
        assert_eq!(constants.combat.max_damage_bonus, 0);
        assert_eq!(constants.combat.attack_base, 5);
    }

    #[test]
    fn test_rejects_zero_threshold() {
        let result = parse_constants("[progression]\nxp_per_level = 0\n");
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }
}
