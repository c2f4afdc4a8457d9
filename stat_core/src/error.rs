use crate::types::EquipmentSlot;
use thiserror::Error;

/// A rejected action. The message is suitable for showing to the player.
///
/// The character and combat state passed in are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("Not enough mana! Need {required}, have {available}.")]
    InsufficientMana { required: i32, available: i32 },
    #[error("{item} cannot be equipped in the {slot} slot.")]
    SlotMismatch { item: String, slot: EquipmentSlot },
    #[error("{0} cannot be used.")]
    ItemNotUsable(String),
    #[error("You are not carrying {0}.")]
    ItemNotHeld(String),
    #[error("Health is already at maximum.")]
    HealthFull,
    #[error("Mana is already at maximum.")]
    ManaFull,
    #[error("Unknown spell: {0}")]
    UnknownSpell(String),
    #[error("You have not learned {0}.")]
    SpellNotKnown(String),
    #[error("Unknown talent: {0}")]
    UnknownTalent(String),
    #[error("{0} cannot be chosen yet.")]
    TalentUnavailable(String),
    #[error("No data for class {0}.")]
    UnknownClass(String),
    #[error("There is no enemy to target.")]
    NoTarget,
    #[error("The {0} action is not available in this fight.")]
    ActionUnavailable(String),
    #[error("{0} is already in combat.")]
    AlreadyInCombat(String),
    #[error("This combat is already over.")]
    CombatOver,
}
