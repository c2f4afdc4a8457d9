use crate::types::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An item template or inventory entry
///
/// Template data is immutable; only `quantity` changes once the item sits in
/// an inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub value: u32,
    #[serde(default)]
    pub rarity: Rarity,
    /// Attribute bonuses granted while equipped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatBonus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub healing: Option<i32>,
    /// Mana restored when consumed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana: Option<i32>,
    #[serde(default)]
    pub stackable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl Item {
    /// Create a bare item with no stat lines
    pub fn new(id: impl Into<String>, name: impl Into<String>, item_type: ItemType) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            item_type,
            value: 0,
            rarity: Rarity::Common,
            stats: None,
            damage: None,
            armor: None,
            healing: None,
            mana: None,
            stackable: false,
            quantity: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_value(mut self, value: u32) -> Self {
        self.value = value;
        self
    }

    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    pub fn with_stats(mut self, stats: StatBonus) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = Some(damage);
        self
    }

    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn with_healing(mut self, healing: i32) -> Self {
        self.healing = Some(healing);
        self
    }

    pub fn with_mana(mut self, mana: i32) -> Self {
        self.mana = Some(mana);
        self
    }

    /// Mark as stackable with the given quantity
    pub fn stacked(mut self, quantity: u32) -> Self {
        self.stackable = true;
        self.quantity = Some(quantity);
        self
    }

    /// Instantiate a template with an explicit quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Quantity held, an absent quantity counts as one
    pub fn quantity(&self) -> u32 {
        self.quantity.unwrap_or(1)
    }

    /// Stat bonus granted while equipped (empty when none)
    pub fn stat_bonus(&self) -> StatBonus {
        self.stats.unwrap_or_default()
    }

    pub fn damage_value(&self) -> i32 {
        self.damage.unwrap_or(0)
    }

    pub fn armor_value(&self) -> i32 {
        self.armor.unwrap_or(0)
    }

    pub fn is_consumable(&self) -> bool {
        self.item_type == ItemType::Consumable
    }

    pub fn is_equippable(&self) -> bool {
        self.item_type.is_equippable()
    }

    /// Export item to markdown format
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n", self.name));
        md.push_str(&format!("**{}** ({})\n\n", self.item_type, self.rarity));

        if !self.description.is_empty() {
            md.push_str(&format!("_{}_\n\n", self.description));
        }

        let mut lines = Vec::new();
        if let Some(damage) = self.damage {
            lines.push(format!("- Damage: {}", damage));
        }
        if let Some(armor) = self.armor {
            lines.push(format!("- Armor: {}", armor));
        }
        if let Some(healing) = self.healing {
            lines.push(format!("- Restores {} health", healing));
        }
        if let Some(mana) = self.mana {
            lines.push(format!("- Restores {} mana", mana));
        }
        if !lines.is_empty() {
            md.push_str("### Properties\n");
            md.push_str(&lines.join("\n"));
            md.push_str("\n\n");
        }

        if let Some(stats) = self.stats.filter(|s| !s.is_empty()) {
            md.push_str("### Bonuses\n");
            for (attribute, value) in stats.iter() {
                md.push_str(&format!("- {:+} {}\n", value, attribute));
            }
            md.push('\n');
        }

        md.push_str(&format!("Value: {} gold", self.value));
        if self.stackable {
            md.push_str(&format!(" (x{})", self.quantity()));
        }
        md.push('\n');
        md
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.name, self.rarity)?;
        if self.stackable && self.quantity() > 1 {
            write!(f, " x{}", self.quantity())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sword() -> Item {
        Item::new("iron_sword", "Iron Sword", ItemType::Weapon)
            .with_value(50)
            .with_damage(8)
            .with_stats(StatBonus::single(Attribute::Strength, 1))
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        assert_eq!(sword().quantity(), 1);
        assert_eq!(sword().with_quantity(3).quantity(), 3);
    }

    #[test]
    fn test_parse_from_toml() {
        let item: Item = toml::from_str(
            r#"
id = "health_potion"
name = "Health Potion"
type = "consumable"
value = 15
healing = 25
stackable = true
quantity = 1
"#,
        )
        .unwrap();

        assert_eq!(item.item_type, ItemType::Consumable);
        assert_eq!(item.rarity, Rarity::Common);
        assert_eq!(item.healing, Some(25));
        assert!(item.is_consumable());
        assert!(!item.is_equippable());
    }

    #[test]
    fn test_markdown_lists_bonuses() {
        let md = sword().to_markdown();
        assert!(md.contains("## Iron Sword"));
        assert!(md.contains("- Damage: 8"));
        assert!(md.contains("+1 Strength"));
    }
}
