use serde::{Deserialize, Serialize};

/// Charisma above this grants a price adjustment
const CHARISMA_BASELINE: i32 = 10;
/// Adjustment per charisma point above the baseline
const CHARISMA_STEP: f64 = 0.02;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShopItem {
    /// Catalogue item id
    pub item: String,
    pub stock: u32,
    #[serde(default = "default_modifier")]
    pub price_modifier: f64,
}

fn default_modifier() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub greeting: String,
    #[serde(default)]
    pub stock: Vec<ShopItem>,
    pub buy_modifier: f64,
    pub sell_modifier: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval_secs: Option<u64>,
}

fn charisma_adjustment(charisma: i32) -> f64 {
    (f64::from(charisma - CHARISMA_BASELINE) * CHARISMA_STEP).max(0.0)
}

impl Merchant {
    /// What the player pays: base × buy modifier, discounted by charisma
    pub fn buy_price(&self, base_price: u32, charisma: i32) -> u32 {
        let modifier = self.buy_modifier * (1.0 - charisma_adjustment(charisma));
        (f64::from(base_price) * modifier).floor().max(0.0) as u32
    }

    /// What the merchant pays: base × sell modifier, raised by charisma
    pub fn sell_price(&self, base_price: u32, charisma: i32) -> u32 {
        let modifier = self.sell_modifier * (1.0 + charisma_adjustment(charisma));
        (f64::from(base_price) * modifier).floor().max(0.0) as u32
    }

    /// Buy price of a stocked item with the given catalogue value
    pub fn listing_price(&self, entry: &ShopItem, item_value: u32, charisma: i32) -> u32 {
        let base = (f64::from(item_value) * entry.price_modifier).floor() as u32;
        self.buy_price(base, charisma)
    }

    pub fn stock_for(&self, item_id: &str) -> Option<&ShopItem> {
        self.stock.iter().find(|s| s.item == item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gareth() -> Merchant {
        Merchant {
            id: "gareth".to_string(),
            name: "Gareth the Trader".to_string(),
            greeting: String::new(),
            stock: vec![ShopItem {
                item: "health_potion".to_string(),
                stock: 10,
                price_modifier: 1.2,
            }],
            buy_modifier: 1.5,
            sell_modifier: 0.5,
            refresh_interval_secs: Some(3600),
        }
    }

    #[test]
    fn test_buy_price_charisma_discount() {
        let merchant = gareth();
        assert_eq!(merchant.buy_price(100, 10), 150);
        // 1.5 * (1 - 0.1) = 1.35
        assert_eq!(merchant.buy_price(100, 15), 135);
        // below baseline earns no penalty
        assert_eq!(merchant.buy_price(100, 6), 150);
    }

    #[test]
    fn test_sell_price_charisma_bonus() {
        let merchant = gareth();
        assert_eq!(merchant.sell_price(100, 10), 50);
        // 0.5 * 1.1 = 0.55
        assert_eq!(merchant.sell_price(100, 15), 55);
    }

    #[test]
    fn test_listing_price() {
        let merchant = gareth();
        let entry = merchant.stock_for("health_potion").unwrap();
        // floor(15 * 1.2) = 18, floor(18 * 1.5) = 27
        assert_eq!(merchant.listing_price(entry, 15, 10), 27);
        assert!(merchant.stock_for("missing").is_none());
    }
}
