//! Inventory - ordered item list with stack merging

use crate::item::Item;
use crate::types::ItemType;
use serde::{Deserialize, Serialize};

/// A player's carried items
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        let mut inventory = Inventory::new();
        for item in items {
            inventory.add(item);
        }
        inventory
    }

    /// Add an item; stackable items merge into an existing entry with the same id
    pub fn add(&mut self, item: Item) {
        if item.stackable {
            if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                existing.quantity = Some(existing.quantity() + item.quantity());
                return;
            }
        }
        let quantity = item.quantity();
        self.items.push(item.with_quantity(quantity));
    }

    /// Remove `quantity` of an item. Returns false when the id is not held.
    ///
    /// Stacks larger than `quantity` shrink; anything else removes the entry.
    pub fn remove(&mut self, item_id: &str, quantity: u32) -> bool {
        let Some(index) = self.items.iter().position(|i| i.id == item_id) else {
            return false;
        };

        let item = &mut self.items[index];
        if item.stackable && item.quantity() > quantity {
            item.quantity = Some(item.quantity() - quantity);
        } else {
            self.items.remove(index);
        }
        true
    }

    /// Take a single unit out of the inventory, returning it
    pub fn take_one(&mut self, item_id: &str) -> Option<Item> {
        let item = self.get(item_id)?.clone().with_quantity(1);
        self.remove(item_id, 1);
        Some(item)
    }

    pub fn get(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn has_item(&self, item_id: &str, quantity: u32) -> bool {
        self.get(item_id).is_some_and(|i| i.quantity() >= quantity)
    }

    pub fn items_of_type(&self, item_type: ItemType) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|i| i.item_type == item_type)
            .collect()
    }

    /// Sum of value × quantity
    pub fn total_value(&self) -> u64 {
        self.items
            .iter()
            .map(|i| u64::from(i.value) * u64::from(i.quantity()))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potion(quantity: u32) -> Item {
        Item::new("health_potion", "Health Potion", ItemType::Consumable)
            .with_value(15)
            .with_healing(25)
            .stacked(quantity)
    }

    #[test]
    fn test_stackable_items_merge() {
        let mut inv = Inventory::new();
        inv.add(potion(3));
        inv.add(potion(2));

        assert_eq!(inv.len(), 1);
        assert_eq!(inv.get("health_potion").map(|i| i.quantity()), Some(5));
        assert!(inv.has_item("health_potion", 5));
        assert!(!inv.has_item("health_potion", 6));
    }

    #[test]
    fn test_non_stackable_items_do_not_merge() {
        let sword = Item::new("iron_sword", "Iron Sword", ItemType::Weapon);
        let mut inv = Inventory::new();
        inv.add(sword.clone());
        inv.add(sword);

        assert_eq!(inv.len(), 2);
        assert_eq!(inv.items_of_type(ItemType::Weapon).len(), 2);
    }

    #[test]
    fn test_remove_shrinks_then_deletes() {
        let mut inv = Inventory::from_items(vec![potion(3)]);

        assert!(inv.remove("health_potion", 2));
        assert_eq!(inv.get("health_potion").map(|i| i.quantity()), Some(1));

        assert!(inv.remove("health_potion", 1));
        assert!(inv.get("health_potion").is_none());
        assert!(!inv.remove("health_potion", 1));
    }

    #[test]
    fn test_take_one_and_total_value() {
        let mut inv = Inventory::from_items(vec![potion(4)]);
        assert_eq!(inv.total_value(), 60);

        let taken = inv.take_one("health_potion").unwrap();
        assert_eq!(taken.quantity(), 1);
        assert_eq!(inv.total_value(), 45);
        assert!(inv.take_one("missing").is_none());
    }
}
