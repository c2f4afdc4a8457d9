//! Encounter state

use crate::enemy::Enemy;
use item_core::Item;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Turn order id of the player
pub const PLAYER_TURN_ID: &str = "player";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CombatPhase {
    #[default]
    PlayerTurn,
    Victory,
    Defeat,
}

impl fmt::Display for CombatPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombatPhase::PlayerTurn => write!(f, "player turn"),
            CombatPhase::Victory => write!(f, "victory"),
            CombatPhase::Defeat => write!(f, "defeat"),
        }
    }
}

/// Categories of player action offered in a fight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Attack,
    Defend,
    Spell,
    Item,
}

/// An action the player may pick, as shown in a menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAction {
    pub id: String,
    pub name: String,
    pub description: String,
    pub kind: ActionKind,
}

impl PlayerAction {
    fn new(kind: ActionKind, name: &str, description: &str) -> Self {
        let id = match kind {
            ActionKind::Attack => "attack",
            ActionKind::Defend => "defend",
            ActionKind::Spell => "spell",
            ActionKind::Item => "item",
        };
        PlayerAction {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            kind,
        }
    }

    /// The concrete action for kinds that need no further input
    pub fn simple_action(&self) -> Option<CombatAction> {
        match self.kind {
            ActionKind::Attack => Some(CombatAction::Attack),
            ActionKind::Defend => Some(CombatAction::Defend),
            ActionKind::Spell | ActionKind::Item => None,
        }
    }
}

/// The four actions every encounter starts with
pub fn default_actions() -> Vec<PlayerAction> {
    vec![
        PlayerAction::new(ActionKind::Attack, "Attack", "Strike a random enemy with your weapon"),
        PlayerAction::new(ActionKind::Defend, "Defend", "Reduce damage from the next attack"),
        PlayerAction::new(ActionKind::Spell, "Cast Spell", "Use one of your known spells"),
        PlayerAction::new(ActionKind::Item, "Use Item", "Consume an item from your inventory"),
    ]
}

/// What the player does on their turn
#[derive(Debug, Clone, PartialEq)]
pub enum CombatAction {
    Attack,
    Defend,
    /// Spell id
    CastSpell(String),
    UseItem(Item),
}

impl CombatAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            CombatAction::Attack => ActionKind::Attack,
            CombatAction::Defend => ActionKind::Defend,
            CombatAction::CastSpell(_) => ActionKind::Spell,
            CombatAction::UseItem(_) => ActionKind::Item,
        }
    }
}

/// A running or finished encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub is_active: bool,
    /// Enemies still standing, in roster order
    pub enemies: Vec<Enemy>,
    /// Roster as it was when combat began (after scaling)
    pub original_enemies: Vec<Enemy>,
    pub turn_order: Vec<String>,
    pub current_turn: usize,
    pub player_actions: Vec<PlayerAction>,
    /// Set by Defend, cleared by the next hit the player takes
    pub is_defending: bool,
    pub turn_number: u32,
    #[serde(default)]
    pub phase: CombatPhase,
}

impl CombatState {
    pub(crate) fn new(enemies: Vec<Enemy>) -> Self {
        let mut turn_order = vec![PLAYER_TURN_ID.to_string()];
        turn_order.extend(enemies.iter().map(|e| e.id.clone()));

        CombatState {
            is_active: true,
            original_enemies: enemies.clone(),
            enemies,
            turn_order,
            current_turn: 0,
            player_actions: default_actions(),
            is_defending: false,
            turn_number: 1,
            phase: CombatPhase::PlayerTurn,
        }
    }

    pub fn enemy(&self, id: &str) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn has_action(&self, kind: ActionKind) -> bool {
        self.player_actions.iter().any(|a| a.kind == kind)
    }

    /// Action to take when the player runs out of time: Defend when offered,
    /// otherwise the first action.
    pub fn default_action(&self) -> Option<&PlayerAction> {
        self.player_actions
            .iter()
            .find(|a| a.kind == ActionKind::Defend)
            .or_else(|| self.player_actions.first())
    }

    pub fn is_over(&self) -> bool {
        !self.is_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = CombatState::new(vec![
            Enemy::new("goblin_1", "Goblin", 20, 5, 1, 1),
            Enemy::new("wolf_2", "Wolf", 25, 7, 1, 1),
        ]);
        assert_eq!(state.turn_order, vec!["player", "goblin_1", "wolf_2"]);
        assert_eq!(state.turn_number, 1);
        assert_eq!(state.current_turn, 0);
        assert!(state.is_active);
        assert!(!state.is_defending);
        assert_eq!(state.original_enemies, state.enemies);
        assert_eq!(state.player_actions.len(), 4);
    }

    #[test]
    fn test_default_action() {
        let mut state = CombatState::new(vec![]);
        assert_eq!(state.default_action().map(|a| a.kind), Some(ActionKind::Defend));
        assert_eq!(
            state.default_action().and_then(|a| a.simple_action()),
            Some(CombatAction::Defend)
        );

        state.player_actions.retain(|a| a.kind != ActionKind::Defend);
        assert_eq!(state.default_action().map(|a| a.kind), Some(ActionKind::Attack));

        state.player_actions.clear();
        assert!(state.default_action().is_none());
    }
}
