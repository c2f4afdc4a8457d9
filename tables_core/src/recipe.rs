use crate::class::CharacterClass;
use item_core::{Inventory, Item, ItemType};
use serde::{Deserialize, Serialize};

/// An item id with a count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Crafting recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub ingredients: Vec<ItemStack>,
    /// Catalogue id of the crafted item
    pub output: String,
    #[serde(default)]
    pub required_level: Option<u32>,
    /// Classes allowed to craft; empty means everyone
    #[serde(default)]
    pub classes: Vec<CharacterClass>,
    pub category: ItemType,
}

impl Recipe {
    pub fn is_available(&self, class: CharacterClass, level: u32) -> bool {
        let level_ok = self.required_level.map_or(true, |l| l <= level);
        let class_ok = self.classes.is_empty() || self.classes.contains(&class);
        level_ok && class_ok
    }

    /// Every ingredient is held in sufficient quantity
    pub fn can_craft(&self, inventory: &Inventory) -> bool {
        self.ingredients
            .iter()
            .all(|i| inventory.has_item(&i.item, i.quantity))
    }

    /// Consume the ingredients and add `output`, returning the new inventory.
    ///
    /// Returns `None` when an ingredient is missing.
    pub fn craft(&self, inventory: &Inventory, output: &Item) -> Option<Inventory> {
        if !self.can_craft(inventory) {
            return None;
        }

        let mut next = inventory.clone();
        for ingredient in &self.ingredients {
            next.remove(&ingredient.item, ingredient.quantity);
        }
        next.add(output.clone().with_quantity(1));
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion_recipe() -> Recipe {
        Recipe {
            id: "greater_health_potion".to_string(),
            name: "Greater Health Potion".to_string(),
            description: String::new(),
            ingredients: vec![
                ItemStack {
                    item: "health_potion".to_string(),
                    quantity: 2,
                },
                ItemStack {
                    item: "magic_crystal".to_string(),
                    quantity: 1,
                },
            ],
            output: "greater_health_potion".to_string(),
            required_level: Some(3),
            classes: vec![],
            category: ItemType::Consumable,
        }
    }

    fn stacked(id: &str, item_type: ItemType, quantity: u32) -> Item {
        Item::new(id, id, item_type).stacked(quantity)
    }

    #[test]
    fn test_availability() {
        let recipe = potion_recipe();
        assert!(!recipe.is_available(CharacterClass::Mage, 2));
        assert!(recipe.is_available(CharacterClass::Mage, 3));

        let mut warrior_only = potion_recipe();
        warrior_only.classes = vec![CharacterClass::Warrior];
        assert!(!warrior_only.is_available(CharacterClass::Mage, 10));
    }

    #[test]
    fn test_craft_consumes_ingredients() {
        let recipe = potion_recipe();
        let inventory = Inventory::from_items(vec![
            stacked("health_potion", ItemType::Consumable, 3),
            stacked("magic_crystal", ItemType::Misc, 1),
        ]);
        let output = stacked("greater_health_potion", ItemType::Consumable, 1);

        let crafted = recipe.craft(&inventory, &output).unwrap();
        assert!(crafted.has_item("health_potion", 1));
        assert!(!crafted.has_item("health_potion", 2));
        assert!(crafted.get("magic_crystal").is_none());
        assert!(crafted.has_item("greater_health_potion", 1));
    }

    #[test]
    fn test_craft_missing_ingredient() {
        let recipe = potion_recipe();
        let inventory =
            Inventory::from_items(vec![stacked("health_potion", ItemType::Consumable, 1)]);
        let output = stacked("greater_health_potion", ItemType::Consumable, 1);

        assert!(!recipe.can_craft(&inventory));
        assert!(recipe.craft(&inventory, &output).is_none());
    }
}
