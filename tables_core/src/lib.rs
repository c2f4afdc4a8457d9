//! tables_core - static game data
//!
//! Classes, spells, talents, recipes, quests, achievements, merchants,
//! status-effect templates and enemy templates, read from TOML. A default
//! data set is compiled in; directories of TOML files can replace or extend
//! it by id.

mod achievement;
mod bestiary;
mod class;
mod config;
mod effect;
mod merchant;
mod quest;
mod recipe;
mod registry;
mod spell;
mod talent;

pub use achievement::{AchievementDef, AchievementReward};
pub use bestiary::EnemyTemplate;
pub use class::{CharacterClass, ClassDef};
pub use config::TableFileConfig;
pub use effect::EffectTemplate;
pub use merchant::{Merchant, ShopItem};
pub use quest::{ObjectiveKind, Quest, QuestObjective, QuestRewards, QuestStatus};
pub use recipe::{ItemStack, Recipe};
pub use registry::GameTables;
pub use spell::{Spell, SpellTarget};
pub use talent::{PassiveValue, Talent, TalentEffect, TalentTree};

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Error loading game data
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading '{path:?}': {error}")]
    Io {
        error: std::io::Error,
        path: Option<PathBuf>,
    },
    #[error("Parse error in '{path}': {error}")]
    Parse {
        error: toml::de::Error,
        path: PathBuf,
    },
    #[error("Validation error in '{path}': {message}")]
    Validation { message: String, path: PathBuf },
    #[error("Game tables already initialized")]
    AlreadyInitialized,
}

/// Global game tables instance
static GAME_TABLES: OnceLock<GameTables> = OnceLock::new();

/// Initialize the global tables from the built-in data plus a directory of
/// overrides. Fails if the tables were already initialized.
pub fn init_tables(dir: &Path) -> Result<(), ConfigError> {
    let tables = GameTables::with_overrides(dir)?;
    GAME_TABLES
        .set(tables)
        .map_err(|_| ConfigError::AlreadyInitialized)
}

/// Check if the global tables have been initialized
pub fn tables_initialized() -> bool {
    GAME_TABLES.get().is_some()
}

/// Get the global tables, loading the built-in data on first use
pub fn tables() -> &'static GameTables {
    GAME_TABLES.get_or_init(|| {
        GameTables::builtin().unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in game data failed to load, using empty tables");
            GameTables::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_tables_are_builtin() {
        let tables = tables();
        assert!(tables_initialized());
        assert!(tables.spell("fireball").is_some());
        assert!(matches!(
            init_tables(Path::new("does/not/exist")),
            Err(ConfigError::AlreadyInitialized)
        ));
    }
}
