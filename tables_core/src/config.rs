use crate::achievement::AchievementDef;
use crate::bestiary::EnemyTemplate;
use crate::class::ClassDef;
use crate::effect::EffectTemplate;
use crate::merchant::Merchant;
use crate::quest::Quest;
use crate::recipe::{ItemStack, Recipe};
use crate::spell::Spell;
use crate::talent::Talent;
use item_core::Item;
use serde::Deserialize;

/// TOML layout of a data file. Every section is optional, so data can be
/// split across files however the author likes.
#[derive(Debug, Default, Deserialize)]
pub struct TableFileConfig {
    #[serde(default)]
    pub classes: Vec<ClassDef>,
    #[serde(default)]
    pub starting_supplies: Vec<ItemStack>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub spells: Vec<Spell>,
    #[serde(default)]
    pub talents: Vec<Talent>,
    #[serde(default)]
    pub recipes: Vec<Recipe>,
    #[serde(default)]
    pub quests: Vec<Quest>,
    #[serde(default)]
    pub achievements: Vec<AchievementDef>,
    #[serde(default)]
    pub merchants: Vec<Merchant>,
    #[serde(default)]
    pub effects: Vec<EffectTemplate>,
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
}

/// Data files compiled into the crate, loaded in this order
pub(crate) const BUILTIN_FILES: &[(&str, &str)] = &[
    ("items.toml", include_str!("../data/items.toml")),
    ("classes.toml", include_str!("../data/classes.toml")),
    ("spells.toml", include_str!("../data/spells.toml")),
    ("effects.toml", include_str!("../data/effects.toml")),
    ("talents.toml", include_str!("../data/talents.toml")),
    ("recipes.toml", include_str!("../data/recipes.toml")),
    ("quests.toml", include_str!("../data/quests.toml")),
    ("achievements.toml", include_str!("../data/achievements.toml")),
    ("merchants.toml", include_str!("../data/merchants.toml")),
    ("bestiary.toml", include_str!("../data/bestiary.toml")),
];
