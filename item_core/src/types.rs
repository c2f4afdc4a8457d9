use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// Core ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Constitution,
    Wisdom,
    Charisma,
}

impl Attribute {
    /// Get all attributes in display order
    pub fn all() -> &'static [Attribute] {
        &[
            Attribute::Strength,
            Attribute::Dexterity,
            Attribute::Intelligence,
            Attribute::Constitution,
            Attribute::Wisdom,
            Attribute::Charisma,
        ]
    }

    /// Three-letter abbreviation used in compact listings
    pub fn short_name(&self) -> &'static str {
        match self {
            Attribute::Strength => "Str",
            Attribute::Dexterity => "Dex",
            Attribute::Intelligence => "Int",
            Attribute::Constitution => "Con",
            Attribute::Wisdom => "Wis",
            Attribute::Charisma => "Cha",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Strength => write!(f, "Strength"),
            Attribute::Dexterity => write!(f, "Dexterity"),
            Attribute::Intelligence => write!(f, "Intelligence"),
            Attribute::Constitution => write!(f, "Constitution"),
            Attribute::Wisdom => write!(f, "Wisdom"),
            Attribute::Charisma => write!(f, "Charisma"),
        }
    }
}

/// Six-dimensional ability-score vector
///
/// Values are signed: debuffs can push an aggregated total below zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Stats {
    pub strength: i32,
    pub dexterity: i32,
    pub intelligence: i32,
    pub constitution: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl Stats {
    pub fn new(
        strength: i32,
        dexterity: i32,
        intelligence: i32,
        constitution: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Self {
        Stats {
            strength,
            dexterity,
            intelligence,
            constitution,
            wisdom,
            charisma,
        }
    }

    /// Read a single attribute
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Constitution => self.constitution,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    /// Mutable access to a single attribute
    pub fn get_mut(&mut self, attribute: Attribute) -> &mut i32 {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Add every attribute present in a partial bonus
    pub fn apply_bonus(&mut self, bonus: &StatBonus) {
        for (attribute, value) in bonus.iter() {
            *self.get_mut(attribute) += value;
        }
    }

    /// Consuming variant of [`Stats::apply_bonus`]
    pub fn with_bonus(mut self, bonus: &StatBonus) -> Self {
        self.apply_bonus(bonus);
        self
    }

    /// Iterate attributes in display order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::all().iter().map(move |a| (*a, self.get(*a)))
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats {
            strength: self.strength + rhs.strength,
            dexterity: self.dexterity + rhs.dexterity,
            intelligence: self.intelligence + rhs.intelligence,
            constitution: self.constitution + rhs.constitution,
            wisdom: self.wisdom + rhs.wisdom,
            charisma: self.charisma + rhs.charisma,
        }
    }
}

/// Partial stat vector. Absent attributes contribute nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatBonus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strength: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dexterity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constitution: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wisdom: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charisma: Option<i32>,
}

impl StatBonus {
    /// A bonus touching a single attribute
    pub fn single(attribute: Attribute, value: i32) -> Self {
        let mut bonus = StatBonus::default();
        bonus.set(attribute, value);
        bonus
    }

    pub fn get(&self, attribute: Attribute) -> Option<i32> {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Dexterity => self.dexterity,
            Attribute::Intelligence => self.intelligence,
            Attribute::Constitution => self.constitution,
            Attribute::Wisdom => self.wisdom,
            Attribute::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, attribute: Attribute, value: i32) {
        let slot = match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        };
        *slot = Some(value);
    }

    /// Builder-style setter
    pub fn with(mut self, attribute: Attribute, value: i32) -> Self {
        self.set(attribute, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        Attribute::all().iter().all(|a| self.get(*a).is_none())
    }

    /// Iterate the attributes that are present
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, i32)> + '_ {
        Attribute::all()
            .iter()
            .filter_map(move |a| self.get(*a).map(|v| (*a, v)))
    }

    /// Human readable listing, e.g. "+2 Str, -1 Dex"
    pub fn display(&self) -> String {
        self.iter()
            .map(|(a, v)| format!("{:+} {}", v, a.short_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
    Misc,
    Quest,
}

impl ItemType {
    /// Whether items of this type can occupy an equipment slot
    pub fn is_equippable(&self) -> bool {
        matches!(self, ItemType::Weapon | ItemType::Armor | ItemType::Misc)
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Weapon => write!(f, "Weapon"),
            ItemType::Armor => write!(f, "Armor"),
            ItemType::Consumable => write!(f, "Consumable"),
            ItemType::Misc => write!(f, "Misc"),
            ItemType::Quest => write!(f, "Quest"),
        }
    }
}

/// Item rarity, ordered from most to least common
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rarity::Common => write!(f, "Common"),
            Rarity::Uncommon => write!(f, "Uncommon"),
            Rarity::Rare => write!(f, "Rare"),
            Rarity::Epic => write!(f, "Epic"),
            Rarity::Legendary => write!(f, "Legendary"),
        }
    }
}

/// Status effect categories
///
/// The category is the replacement key for non-stackable effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    Poison,
    Burn,
    Freeze,
    Stun,
    Bleed,
    BuffStrength,
    BuffDefense,
    BuffMagic,
    DebuffAttack,
    DebuffDefense,
    Regeneration,
}

impl EffectType {
    /// Get all effect type variants
    pub fn all() -> &'static [EffectType] {
        &[
            EffectType::Poison,
            EffectType::Burn,
            EffectType::Freeze,
            EffectType::Stun,
            EffectType::Bleed,
            EffectType::BuffStrength,
            EffectType::BuffDefense,
            EffectType::BuffMagic,
            EffectType::DebuffAttack,
            EffectType::DebuffDefense,
            EffectType::Regeneration,
        ]
    }

    /// Whether this is a harmful effect
    pub fn is_debuff(&self) -> bool {
        matches!(
            self,
            EffectType::Poison
                | EffectType::Burn
                | EffectType::Freeze
                | EffectType::Stun
                | EffectType::Bleed
                | EffectType::DebuffAttack
                | EffectType::DebuffDefense
        )
    }

    /// Whether this effect deals damage every turn
    pub fn is_damaging(&self) -> bool {
        matches!(
            self,
            EffectType::Poison | EffectType::Burn | EffectType::Bleed
        )
    }

    /// Snake-case identifier, matching the serialized form
    pub fn id(&self) -> &'static str {
        match self {
            EffectType::Poison => "poison",
            EffectType::Burn => "burn",
            EffectType::Freeze => "freeze",
            EffectType::Stun => "stun",
            EffectType::Bleed => "bleed",
            EffectType::BuffStrength => "buff_strength",
            EffectType::BuffDefense => "buff_defense",
            EffectType::BuffMagic => "buff_magic",
            EffectType::DebuffAttack => "debuff_attack",
            EffectType::DebuffDefense => "debuff_defense",
            EffectType::Regeneration => "regeneration",
        }
    }
}

impl fmt::Display for EffectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EffectType::Poison => write!(f, "Poison"),
            EffectType::Burn => write!(f, "Burn"),
            EffectType::Freeze => write!(f, "Freeze"),
            EffectType::Stun => write!(f, "Stun"),
            EffectType::Bleed => write!(f, "Bleed"),
            EffectType::BuffStrength => write!(f, "Strength Buff"),
            EffectType::BuffDefense => write!(f, "Defense Buff"),
            EffectType::BuffMagic => write!(f, "Magic Buff"),
            EffectType::DebuffAttack => write!(f, "Attack Debuff"),
            EffectType::DebuffDefense => write!(f, "Defense Debuff"),
            EffectType::Regeneration => write!(f, "Regeneration"),
        }
    }
}
