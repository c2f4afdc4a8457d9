//! Enemies and encounter rosters

use crate::config::CombatConstants;
use item_core::StatusEffect;
use serde::{Deserialize, Serialize};
use tables_core::{tables, EnemyTemplate, GameTables};
use tracing::warn;

/// An enemy instance in an encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    /// Unique within one encounter
    pub id: String,
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub damage: i32,
    #[serde(default)]
    pub armor: i32,
    pub level: u32,
    #[serde(default)]
    pub status_effects: Vec<StatusEffect>,
}

impl Enemy {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        health: i32,
        damage: i32,
        armor: i32,
        level: u32,
    ) -> Self {
        Enemy {
            id: id.into(),
            name: name.into(),
            health,
            max_health: health,
            damage,
            armor,
            level,
            status_effects: Vec::new(),
        }
    }

    /// Fresh instance of a bestiary entry; `index` makes the id unique
    pub fn spawn(template: &EnemyTemplate, index: usize) -> Self {
        Enemy::new(
            format!("{}_{}", template.id, index),
            template.name.clone(),
            template.health,
            template.damage,
            template.armor,
            template.level,
        )
    }

    /// Copy scaled for a player above level 1. Effects are cleared.
    pub(crate) fn scaled(&self, player_level: u32, combat: &CombatConstants) -> Self {
        let mut scaled = self.clone();
        scaled.status_effects.clear();
        if player_level <= 1 {
            return scaled;
        }

        let delta = f64::from(player_level - 1);
        let scale = |value: i32, rate: f64| (f64::from(value) * (1.0 + rate * delta)).floor() as i32;

        scaled.health = scale(self.health, combat.health_scaling);
        scaled.max_health = scale(self.max_health, combat.health_scaling);
        scaled.damage = scale(self.damage, combat.damage_scaling);
        scaled.armor = scale(self.armor, combat.armor_scaling);
        scaled
    }
}

/// Spawn an encounter from bestiary ids using the global tables
pub fn spawn_encounter(ids: &[&str]) -> Vec<Enemy> {
    spawn_encounter_from(tables(), ids)
}

/// Spawn an encounter from bestiary ids. Unknown ids are skipped.
pub fn spawn_encounter_from(tables: &GameTables, ids: &[&str]) -> Vec<Enemy> {
    ids.iter()
        .enumerate()
        .filter_map(|(i, id)| match tables.enemy(id) {
            Some(template) => Some(Enemy::spawn(template, i + 1)),
            None => {
                warn!(enemy = id, "unknown enemy id, skipped");
                None
            }
        })
        .collect()
}
