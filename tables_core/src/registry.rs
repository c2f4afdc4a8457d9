use crate::achievement::AchievementDef;
use crate::bestiary::EnemyTemplate;
use crate::class::{CharacterClass, ClassDef};
use crate::config::{TableFileConfig, BUILTIN_FILES};
use crate::effect::EffectTemplate;
use crate::merchant::Merchant;
use crate::quest::Quest;
use crate::recipe::{ItemStack, Recipe};
use crate::spell::Spell;
use crate::talent::Talent;
use crate::ConfigError;
use item_core::{EffectType, Inventory, Item, StatusEffect};
use std::path::{Path, PathBuf};
use tracing::debug;

/// All static game data
///
/// Entries keep file order. Loading a second definition with an existing id
/// replaces the first in place.
#[derive(Debug, Clone, Default)]
pub struct GameTables {
    classes: Vec<ClassDef>,
    starting_supplies: Vec<ItemStack>,
    items: Vec<Item>,
    spells: Vec<Spell>,
    talents: Vec<Talent>,
    recipes: Vec<Recipe>,
    quests: Vec<Quest>,
    achievements: Vec<AchievementDef>,
    merchants: Vec<Merchant>,
    effects: Vec<EffectTemplate>,
    enemies: Vec<EnemyTemplate>,
}

fn upsert<T, K: PartialEq>(entries: &mut Vec<T>, entry: T, key: impl Fn(&T) -> K) {
    let k = key(&entry);
    match entries.iter_mut().find(|e| key(e) == k) {
        Some(existing) => *existing = entry,
        None => entries.push(entry),
    }
}

impl GameTables {
    /// Create an empty set of tables
    pub fn new() -> Self {
        Self::default()
    }

    /// The data set compiled into the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        let mut tables = Self::new();
        for (name, content) in BUILTIN_FILES {
            tables.merge_str(content, Path::new(name))?;
        }
        tables.check(Path::new("builtin"))?;
        Ok(tables)
    }

    /// Load every `.toml` file under a directory (recursively)
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let mut tables = Self::new();
        tables.load_dir(dir)?;
        tables.check(dir)?;
        Ok(tables)
    }

    /// The built-in data with a directory of overrides merged on top
    pub fn with_overrides(dir: &Path) -> Result<Self, ConfigError> {
        let mut tables = Self::builtin()?;
        tables.load_dir(dir)?;
        tables.check(dir)?;
        Ok(tables)
    }

    fn load_dir(&mut self, dir: &Path) -> Result<(), ConfigError> {
        if !dir.exists() {
            return Ok(());
        }

        let entries = std::fs::read_dir(dir).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(dir.to_path_buf()),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| ConfigError::Io {
                error: e,
                path: Some(dir.to_path_buf()),
            })?;
            paths.push(entry.path());
        }
        // later files override earlier ones, so keep the order stable
        paths.sort();

        for path in paths {
            if path.is_dir() {
                self.load_dir(&path)?;
            } else if path.extension().is_some_and(|ext| ext == "toml") {
                self.load_file(&path)?;
            }
        }

        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            error: e,
            path: Some(path.to_path_buf()),
        })?;
        self.merge_str(&content, path)
    }

    /// Parse one TOML document and merge it into the tables
    pub fn merge_str(&mut self, content: &str, path: &Path) -> Result<(), ConfigError> {
        let config: TableFileConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            error: e,
            path: path.to_path_buf(),
        })?;
        debug!(path = %path.display(), "merging table file");
        self.merge(config);
        Ok(())
    }

    /// Merge parsed entries, replacing any with a matching id
    pub fn merge(&mut self, config: TableFileConfig) {
        for class in config.classes {
            upsert(&mut self.classes, class, |c| c.class);
        }
        if !config.starting_supplies.is_empty() {
            self.starting_supplies = config.starting_supplies;
        }
        for item in config.items {
            upsert(&mut self.items, item, |i| i.id.clone());
        }
        for spell in config.spells {
            upsert(&mut self.spells, spell, |s| s.id.clone());
        }
        for talent in config.talents {
            upsert(&mut self.talents, talent, |t| t.id.clone());
        }
        for recipe in config.recipes {
            upsert(&mut self.recipes, recipe, |r| r.id.clone());
        }
        for quest in config.quests {
            upsert(&mut self.quests, quest, |q| q.id.clone());
        }
        for achievement in config.achievements {
            upsert(&mut self.achievements, achievement, |a| a.id.clone());
        }
        for merchant in config.merchants {
            upsert(&mut self.merchants, merchant, |m| m.id.clone());
        }
        for effect in config.effects {
            upsert(&mut self.effects, effect, |e| e.effect_type);
        }
        for enemy in config.enemies {
            upsert(&mut self.enemies, enemy, |e| e.id.clone());
        }
    }

    fn check(&self, path: &Path) -> Result<(), ConfigError> {
        let problems = self.validate();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation {
                message: problems.join("; "),
                path: PathBuf::from(path),
            })
        }
    }

    /// Report every reference to an id that is not defined
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut check_item = |context: &str, id: &str| {
            if self.item(id).is_none() {
                problems.push(format!("{} refers to unknown item '{}'", context, id));
            }
        };

        for class in &self.classes {
            for id in &class.starting_items {
                check_item(&format!("class {}", class.class), id);
            }
        }
        for stack in &self.starting_supplies {
            check_item("starting supplies", &stack.item);
        }
        for recipe in &self.recipes {
            for ingredient in &recipe.ingredients {
                check_item(&format!("recipe {}", recipe.id), &ingredient.item);
            }
            check_item(&format!("recipe {}", recipe.id), &recipe.output);
        }
        for merchant in &self.merchants {
            for entry in &merchant.stock {
                check_item(&format!("merchant {}", merchant.id), &entry.item);
            }
        }
        for quest in &self.quests {
            for id in &quest.rewards.items {
                check_item(&format!("quest {}", quest.id), id);
            }
        }
        for achievement in &self.achievements {
            if let Some(id) = achievement.reward.as_ref().and_then(|r| r.item.as_ref()) {
                check_item(&format!("achievement {}", achievement.id), id);
            }
        }

        for talent in &self.talents {
            for req in &talent.requirements {
                if self.talent(req).is_none() {
                    problems.push(format!(
                        "talent {} requires unknown talent '{}'",
                        talent.id, req
                    ));
                }
            }
            for spell in talent.unlocked_spells() {
                if self.spell(spell).is_none() {
                    problems.push(format!(
                        "talent {} unlocks unknown spell '{}'",
                        talent.id, spell
                    ));
                }
            }
        }
        for quest in &self.quests {
            if let Some(spell) = &quest.rewards.unlock_spell {
                if self.spell(spell).is_none() {
                    problems.push(format!("quest {} unlocks unknown spell '{}'", quest.id, spell));
                }
            }
        }
        for spell in &self.spells {
            if let Some(effect) = spell.effect {
                if self.effect_template(effect).is_none() {
                    problems.push(format!(
                        "spell {} applies '{}' which has no template",
                        spell.id,
                        effect.id()
                    ));
                }
            }
        }

        problems
    }

    // Classes

    pub fn class(&self, class: CharacterClass) -> Option<&ClassDef> {
        self.classes.iter().find(|c| c.class == class)
    }

    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    /// Class starting equipment plus the common supplies
    pub fn starting_inventory(&self, class: CharacterClass) -> Inventory {
        let mut inventory = Inventory::new();
        if let Some(def) = self.class(class) {
            for id in &def.starting_items {
                if let Some(item) = self.instantiate_item(id, 1) {
                    inventory.add(item);
                }
            }
        }
        for stack in &self.starting_supplies {
            if let Some(item) = self.instantiate_item(&stack.item, stack.quantity) {
                inventory.add(item);
            }
        }
        inventory
    }

    // Items

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Copy of a catalogue item carrying `quantity`
    pub fn instantiate_item(&self, id: &str, quantity: u32) -> Option<Item> {
        self.item(id).map(|i| i.clone().with_quantity(quantity))
    }

    // Spells

    pub fn spell(&self, id: &str) -> Option<&Spell> {
        self.spells.iter().find(|s| s.id == id)
    }

    pub fn spells_for_class(&self, class: CharacterClass) -> Vec<&Spell> {
        self.spells.iter().filter(|s| s.usable_by(class)).collect()
    }

    /// Spells the class knows by levelling alone at `level`
    pub fn available_spells(&self, class: CharacterClass, level: u32) -> Vec<&Spell> {
        self.spells
            .iter()
            .filter(|s| s.unlocked_at(class, level))
            .collect()
    }

    /// Spells unlocked exactly at `level`
    pub fn newly_unlocked(&self, class: CharacterClass, level: u32) -> Vec<&Spell> {
        self.spells
            .iter()
            .filter(|s| s.unlocked_at(class, level) && s.required_level == level)
            .collect()
    }

    // Talents

    pub fn talent(&self, id: &str) -> Option<&Talent> {
        self.talents.iter().find(|t| t.id == id)
    }

    pub fn talents_for_class(&self, class: CharacterClass) -> Vec<&Talent> {
        self.talents.iter().filter(|t| t.class == class).collect()
    }

    pub fn available_talents(
        &self,
        class: CharacterClass,
        level: u32,
        chosen: &[String],
    ) -> Vec<&Talent> {
        self.talents
            .iter()
            .filter(|t| t.class == class && t.is_available(level, chosen))
            .collect()
    }

    // Recipes

    pub fn recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    pub fn available_recipes(&self, class: CharacterClass, level: u32) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.is_available(class, level))
            .collect()
    }

    /// Craft a recipe against an inventory, returning the new inventory
    pub fn craft(&self, recipe_id: &str, inventory: &Inventory) -> Option<Inventory> {
        let recipe = self.recipe(recipe_id)?;
        let output = self.item(&recipe.output)?;
        recipe.craft(inventory, output)
    }

    // Quests

    pub fn quest(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    pub fn available_quests(&self, player_level: u32) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| q.is_offered_at(player_level))
            .collect()
    }

    // Achievements

    pub fn achievement(&self, id: &str) -> Option<&AchievementDef> {
        self.achievements.iter().find(|a| a.id == id)
    }

    pub fn achievements(&self) -> &[AchievementDef] {
        &self.achievements
    }

    // Merchants

    pub fn merchant(&self, id: &str) -> Option<&Merchant> {
        self.merchants.iter().find(|m| m.id == id)
    }

    pub fn merchants(&self) -> &[Merchant] {
        &self.merchants
    }

    // Status effects

    pub fn effect_template(&self, effect_type: EffectType) -> Option<&EffectTemplate> {
        self.effects.iter().find(|e| e.effect_type == effect_type)
    }

    /// Fresh status effect of the given type
    pub fn status_effect(&self, effect_type: EffectType) -> Option<StatusEffect> {
        self.effect_template(effect_type).map(|t| t.instantiate())
    }

    // Bestiary

    pub fn enemy(&self, id: &str) -> Option<&EnemyTemplate> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemies(&self) -> &[EnemyTemplate] {
        &self.enemies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use item_core::{Attribute, ItemType};
    use std::io::Write;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) {
        let path = dir.join(format!("{}.toml", name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_builtin_data_is_valid() {
        let tables = GameTables::builtin().unwrap();
        assert!(tables.validate().is_empty());
        assert_eq!(tables.classes().len(), 4);
        assert_eq!(tables.talents.len(), 36);
        assert_eq!(tables.quests().len(), 10);
        assert_eq!(tables.merchants().len(), 4);
        for effect in EffectType::all() {
            assert!(tables.effect_template(*effect).is_some(), "{}", effect);
        }
    }

    #[test]
    fn test_class_values() {
        let tables = GameTables::builtin().unwrap();
        let mage = tables.class(CharacterClass::Mage).unwrap();
        assert_eq!(mage.base_stats.intelligence, 16);
        assert_eq!(mage.per_level.get(Attribute::Wisdom), 2);
        assert_eq!(mage.starting_gold, 75);
    }

    #[test]
    fn test_starting_inventory() {
        let tables = GameTables::builtin().unwrap();
        let inventory = tables.starting_inventory(CharacterClass::Warrior);

        assert!(inventory.has_item("iron_sword", 1));
        assert!(inventory.has_item("leather_armor", 1));
        assert!(inventory.has_item("health_potion", 3));
        assert!(inventory.has_item("bread", 5));
        assert_eq!(inventory.len(), 4);
    }

    #[test]
    fn test_spell_filters() {
        let tables = GameTables::builtin().unwrap();

        let level_one: Vec<_> = tables
            .available_spells(CharacterClass::Mage, 1)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(level_one, vec!["fireball"]);

        let at_three: Vec<_> = tables
            .newly_unlocked(CharacterClass::Mage, 3)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(at_three, vec!["ice_shard"]);

        // talent spells never appear through levelling
        assert!(tables
            .available_spells(CharacterClass::Mage, 50)
            .iter()
            .all(|s| s.id != "meteor_storm"));
        assert!(tables.newly_unlocked(CharacterClass::Warrior, 1).is_empty());
    }

    #[test]
    fn test_available_talents() {
        let tables = GameTables::builtin().unwrap();
        assert!(tables
            .available_talents(CharacterClass::Warrior, 4, &[])
            .is_empty());
        assert_eq!(
            tables
                .available_talents(CharacterClass::Warrior, 5, &[])
                .len(),
            3
        );

        let chosen = vec!["warrior_fortify".to_string()];
        let ids: Vec<_> = tables
            .available_talents(CharacterClass::Warrior, 10, &chosen)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert!(ids.contains(&"warrior_iron_skin"));
        assert!(!ids.contains(&"warrior_fortify"));
        assert!(!ids.contains(&"warrior_combat_mastery"));
    }

    #[test]
    fn test_available_quests() {
        let tables = GameTables::builtin().unwrap();
        let ids: Vec<_> = tables
            .available_quests(1)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert!(ids.contains(&"defeat_bandits"));
        assert!(!ids.contains(&"hidden_grove"));
    }

    #[test]
    fn test_craft_from_catalogue() {
        let tables = GameTables::builtin().unwrap();
        let mut inventory = Inventory::new();
        inventory.add(tables.instantiate_item("health_potion", 2).unwrap());
        inventory.add(tables.instantiate_item("magic_crystal", 1).unwrap());

        let crafted = tables.craft("greater_health_potion", &inventory).unwrap();
        assert!(crafted.has_item("greater_health_potion", 1));
        assert!(!crafted.has_item("health_potion", 1));
        assert!(tables.craft("greater_health_potion", &crafted).is_none());
    }

    #[test]
    fn test_status_effect_from_template() {
        let tables = GameTables::builtin().unwrap();
        let burn = tables.status_effect(EffectType::Burn).unwrap();
        assert_eq!(burn.id, "burn");
        assert!(burn.damage() > 0);
    }

    #[test]
    fn test_load_directory() {
        let dir = TempDir::new().unwrap();
        create_test_file(
            dir.path(),
            "items",
            r#"
[[items]]
id = "rusty_key"
name = "Rusty Key"
type = "quest"
"#,
        );
        create_test_file(
            dir.path(),
            "enemies",
            r#"
[[enemies]]
id = "rat"
name = "Rat"
health = 5
damage = 1
"#,
        );

        let tables = GameTables::load(dir.path()).unwrap();
        assert_eq!(
            tables.item("rusty_key").map(|i| i.item_type),
            Some(ItemType::Quest)
        );
        assert_eq!(tables.enemy("rat").map(|e| e.level), Some(1));
    }

    #[test]
    fn test_overrides_replace_by_id() {
        let dir = TempDir::new().unwrap();
        create_test_file(
            dir.path(),
            "bread",
            r#"
[[items]]
id = "bread"
name = "Stale Bread"
type = "consumable"
value = 1
healing = 2
stackable = true
"#,
        );

        let tables = GameTables::with_overrides(dir.path()).unwrap();
        let bread = tables.item("bread").unwrap();
        assert_eq!(bread.name, "Stale Bread");
        assert_eq!(bread.healing, Some(2));
        assert!(tables.item("iron_sword").is_some());
    }

    #[test]
    fn test_dangling_reference_fails_validation() {
        let dir = TempDir::new().unwrap();
        create_test_file(
            dir.path(),
            "recipes",
            r#"
[[recipes]]
id = "mystery"
name = "Mystery"
ingredients = [{ item = "nothing", quantity = 1 }]
output = "also_nothing"
category = "misc"
"#,
        );

        let result = GameTables::load(dir.path());
        assert!(matches!(result, Err(ConfigError::Validation { .. })));
    }

    #[test]
    fn test_parse_error_reports_path() {
        let dir = TempDir::new().unwrap();
        create_test_file(dir.path(), "broken", "[[items]\nid = ");

        match GameTables::load(dir.path()) {
            Err(ConfigError::Parse { path, .. }) => {
                assert!(path.ends_with("broken.toml"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
