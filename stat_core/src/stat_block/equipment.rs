//! Equip and unequip

use crate::character::Character;
use crate::error::ActionError;
use crate::types::EquipmentSlot;
use item_core::Item;
use tracing::{debug, warn};

/// Place `item` in `slot`, returning the new character and whatever the slot
/// held before. The displaced item is not returned to any inventory.
///
/// Fails without changes if the item's type does not match the slot.
pub fn equip_item(
    character: &Character,
    item: Item,
    slot: EquipmentSlot,
) -> Result<(Character, Option<Item>), ActionError> {
    if item.item_type != slot.accepts() {
        warn!(item = %item.id, slot = %slot, "equip rejected, slot mismatch");
        return Err(ActionError::SlotMismatch {
            item: item.name,
            slot,
        });
    }

    let mut next = character.clone();
    debug!(item = %item.id, slot = %slot, "equipped");
    let previous = next.equipment.slot_mut(slot).replace(item);
    Ok((next, previous))
}

/// Empty `slot`, returning the new character and the removed item
pub fn unequip_item(character: &Character, slot: EquipmentSlot) -> (Character, Option<Item>) {
    let mut next = character.clone();
    let removed = next.equipment.slot_mut(slot).take();
    (next, removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::create_character;
    use crate::stat_block::{attack_power, total_stats};
    use item_core::{Attribute, ItemType, StatBonus};
    use tables_core::CharacterClass;

    fn sword() -> Item {
        Item::new("test_sword", "Test Sword", ItemType::Weapon)
            .with_damage(8)
            .with_stats(StatBonus::single(Attribute::Strength, 2))
    }

    #[test]
    fn test_equip_weapon_updates_totals() {
        let c = create_character("Lyanna", CharacterClass::Warrior).unwrap();
        let (equipped, previous) = equip_item(&c, sword(), EquipmentSlot::Weapon).unwrap();

        assert!(previous.is_none());
        assert_eq!(total_stats(&equipped).strength, c.stats.strength + 2);
        assert_eq!(attack_power(&equipped), (16 + 2) / 2 + 5 + 8);
        // input untouched
        assert!(c.equipment.weapon.is_none());
    }

    #[test]
    fn test_slot_mismatch_rejected() {
        let c = create_character("Lyanna", CharacterClass::Warrior).unwrap();

        let err = equip_item(&c, sword(), EquipmentSlot::Armor).unwrap_err();
        assert!(matches!(err, ActionError::SlotMismatch { .. }));

        let ring = Item::new("ring", "Ring", ItemType::Misc);
        assert!(equip_item(&c, ring.clone(), EquipmentSlot::Weapon).is_err());
        assert!(equip_item(&c, ring, EquipmentSlot::Accessory2).is_ok());

        let potion = Item::new("potion", "Potion", ItemType::Consumable);
        for slot in EquipmentSlot::all() {
            assert!(equip_item(&c, potion.clone(), *slot).is_err());
        }
    }

    #[test]
    fn test_equip_unequip_round_trip() {
        let c = create_character("Lyanna", CharacterClass::Warrior).unwrap();
        let (equipped, _) = equip_item(&c, sword(), EquipmentSlot::Weapon).unwrap();
        let (bare, removed) = unequip_item(&equipped, EquipmentSlot::Weapon);

        assert_eq!(removed, Some(sword()));
        assert!(bare.equipment.weapon.is_none());
        assert_eq!(bare, c);
    }

    #[test]
    fn test_equip_replaces_and_returns_previous() {
        let c = create_character("Lyanna", CharacterClass::Warrior).unwrap();
        let (first, _) = equip_item(&c, sword(), EquipmentSlot::Weapon).unwrap();

        let axe = Item::new("axe", "Axe", ItemType::Weapon).with_damage(15);
        let (second, previous) = equip_item(&first, axe.clone(), EquipmentSlot::Weapon).unwrap();

        assert_eq!(previous, Some(sword()));
        assert_eq!(second.equipment.weapon, Some(axe));
    }

    #[test]
    fn test_unequip_empty_slot() {
        let c = create_character("Lyanna", CharacterClass::Warrior).unwrap();
        let (same, removed) = unequip_item(&c, EquipmentSlot::Accessory1);
        assert!(removed.is_none());
        assert_eq!(same, c);
    }
}
