//! Turn-based combat
//!
//! [`initiate_combat`] builds a [`CombatState`] from a roster, then each call
//! to [`resolve_turn`] plays the player's action, the enemy phase and the
//! status-effect upkeep, returning new values and an event log.

mod event;
mod resolution;
mod rewards;
mod spell;
mod state;

pub use event::CombatEvent;
pub use resolution::{initiate_combat, resolve_turn, resolve_turn_with_rng, TurnOutcome};
pub use rewards::{apply_rewards, victory_rewards, Rewards};
pub use spell::{cast_spell, SpellOutcome};
pub use state::{
    default_actions, ActionKind, CombatAction, CombatPhase, CombatState, PlayerAction,
    PLAYER_TURN_ID,
};
