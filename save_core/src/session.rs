//! A playthrough in progress

use crate::achievements::AchievementTracker;
use crate::quest_log::{ObjectiveUpdate, QuestLog};
use crate::record::{SaveRecord, SAVE_VERSION};
use crate::store::{SaveSlot, SaveStore};
use crate::PersistError;
use chrono::Utc;
use item_core::Inventory;
use rand::Rng;
use stat_core::combat::{initiate_combat, resolve_turn_with_rng, CombatAction, CombatEvent, TurnOutcome};
use stat_core::{apply_rewards, spawn_encounter_from, ActionError, Character, CombatState, Rewards};
use std::collections::BTreeMap;
use story_core::{ChoiceOutcome, StoryEngine};
use tables_core::{tables, QuestRewards};
use tracing::{info, warn};

/// Everything the player has going, and the state a save record is cut from
#[derive(Debug, Clone)]
pub struct GameSession {
    pub character: Character,
    pub inventory: Inventory,
    pub story: StoryEngine,
    pub quests: QuestLog,
    pub achievements: AchievementTracker,
    pub flags: BTreeMap<String, bool>,
    /// Value of the last `location:` tag the story passed through
    pub location: String,
    pub combat: Option<CombatState>,
}

impl GameSession {
    /// Fresh session: class starting gear, every quest and achievement from
    /// the global tables.
    pub fn new(character: Character, story: StoryEngine) -> Self {
        let tables = tables();
        let mut session = GameSession {
            inventory: tables.starting_inventory(character.class),
            quests: QuestLog::from_tables(tables),
            achievements: AchievementTracker::from_tables(tables),
            character,
            story,
            flags: BTreeMap::new(),
            location: String::new(),
            combat: None,
        };
        session.sync_location();
        session
    }

    pub fn flag(&self, name: &str) -> bool {
        self.flags.get(name).copied().unwrap_or(false)
    }

    pub fn set_flag(&mut self, name: impl Into<String>, value: bool) {
        self.flags.insert(name.into(), value);
    }

    fn sync_location(&mut self) {
        let location = self
            .story
            .current_node()
            .and_then(|node| node.tag_values("location").next())
            .map(str::to_string);
        if let Some(location) = location {
            self.location = location;
        }
    }

    /// Follow a story choice, tracking the location
    pub fn make_choice(&mut self, index: usize) -> ChoiceOutcome {
        let outcome = self.story.make_choice(index);
        if outcome.moved {
            self.sync_location();
        }
        outcome
    }

    // Combat

    /// Start a fight against bestiary ids. Unknown ids are skipped.
    pub fn begin_encounter(&mut self, enemy_ids: &[&str]) -> Result<&CombatState, ActionError> {
        let enemies = spawn_encounter_from(tables(), enemy_ids);
        let (character, state) = initiate_combat(&self.character, &enemies, self.character.level)?;
        self.character = character;
        Ok(&*self.combat.insert(state))
    }

    /// Resolve a turn of the current fight.
    ///
    /// Items are used from the inventory, so only the carried copy counts and
    /// it leaves the inventory. On victory the rewards are granted and kills
    /// count toward achievements; once the fight ends the session leaves
    /// combat.
    pub fn take_turn(&mut self, action: CombatAction, rng: &mut impl Rng) -> Result<TurnOutcome, ActionError> {
        let state = self.combat.as_ref().ok_or(ActionError::CombatOver)?;
        let (action, used_item) = match action {
            CombatAction::UseItem(item) => {
                let held = self
                    .inventory
                    .get(&item.id)
                    .filter(|held| held.quantity() >= 1)
                    .ok_or_else(|| ActionError::ItemNotHeld(item.name.clone()))?;
                let id = held.id.clone();
                (CombatAction::UseItem(held.clone().with_quantity(1)), Some(id))
            }
            other => (other, None),
        };
        let outcome = resolve_turn_with_rng(&self.character, state, action, rng)?;

        if let Some(id) = used_item {
            self.inventory.remove(&id, 1);
        }
        self.character = outcome.character.clone();

        let kills = outcome
            .events
            .iter()
            .filter(|e| matches!(e, CombatEvent::EnemyDefeated { .. }))
            .count();
        if kills > 0 {
            self.achievements
                .update_progress("monster_slayer", u32::try_from(kills).unwrap_or(u32::MAX));
        }
        if let Some(rewards) = outcome.rewards {
            self.character = apply_rewards(&self.character, &rewards);
            self.achievements.update_progress("first_blood", 1);
            self.track_level();
        }

        self.combat = if outcome.state.is_over() {
            None
        } else {
            Some(outcome.state.clone())
        };
        Ok(outcome)
    }

    // Quests

    /// Advance a quest objective, granting the quest's rewards if it completes
    pub fn advance_objective(&mut self, quest_id: &str, objective_id: &str, amount: u32) -> ObjectiveUpdate {
        let update = self.quests.update_objective(quest_id, objective_id, amount);
        if let ObjectiveUpdate::QuestCompleted(rewards) = &update {
            self.grant_quest_rewards(rewards);
        }
        update
    }

    /// Complete an active quest outright and grant its rewards
    pub fn complete_quest(&mut self, quest_id: &str) -> bool {
        match self.quests.complete(quest_id) {
            Some(rewards) => {
                self.grant_quest_rewards(&rewards);
                true
            }
            None => false,
        }
    }

    fn grant_quest_rewards(&mut self, rewards: &QuestRewards) {
        let tables = tables();
        self.character = apply_rewards(
            &self.character,
            &Rewards {
                experience: rewards.experience,
                gold: rewards.gold,
            },
        );
        for id in &rewards.items {
            match tables.instantiate_item(id, 1) {
                Some(item) => self.inventory.add(item),
                None => warn!(item = %id, "quest reward names an unknown item"),
            }
        }
        if let Some(spell) = &rewards.unlock_spell {
            if !self.character.knows_spell(spell) {
                self.character.known_spells.push(spell.clone());
            }
        }
        self.achievements.update_progress("quest_master", 1);
        self.track_level();
    }

    fn track_level(&mut self) {
        let progress = self.character.level;
        let reached = self
            .achievements
            .get("seasoned_adventurer")
            .map_or(0, |a| a.progress);
        if progress > reached {
            self.achievements
                .update_progress("seasoned_adventurer", progress - reached);
        }
    }

    // Persistence

    /// Snapshot for a save slot
    pub fn record(&self) -> SaveRecord {
        SaveRecord {
            version: SAVE_VERSION,
            save_slot: 0,
            last_saved: Utc::now(),
            character: self.character.clone(),
            inventory: self.inventory.clone(),
            story: self.story.progress(),
            current_location: self.location.clone(),
            game_flags: self.flags.clone(),
            combat_state: self.combat.clone(),
            quests: self.quests.all().to_vec(),
            achievements: self.achievements.all().to_vec(),
        }
    }

    /// Replace the session state with a record's
    pub fn restore(&mut self, record: SaveRecord) {
        self.story.restore(record.story);
        self.character = record.character;
        self.inventory = record.inventory;
        self.location = record.current_location;
        self.flags = record.game_flags;
        self.combat = record.combat_state;
        self.quests = QuestLog::new(record.quests);
        self.achievements = AchievementTracker::new(record.achievements);
    }

    /// Write the session to `slot`. Failures are logged and returned.
    pub fn save<S: SaveStore + ?Sized>(&self, store: &mut S, slot: SaveSlot) -> Result<(), PersistError> {
        match store.save(slot, &self.record()) {
            Ok(()) => {
                info!(%slot, character = %self.character.name, "game saved");
                Ok(())
            }
            Err(error) => {
                warn!(%slot, %error, "failed to save game");
                Err(error)
            }
        }
    }

    /// Load `slot` into the session. Returns false for an empty slot.
    ///
    /// On any failure the session is left as it was.
    pub fn load<S: SaveStore + ?Sized>(&mut self, store: &S, slot: SaveSlot) -> Result<bool, PersistError> {
        match store.load(slot) {
            Ok(Some(record)) => {
                self.restore(record);
                info!(%slot, character = %self.character.name, "game loaded");
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(error) => {
                warn!(%slot, %error, "failed to load game");
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use stat_core::create_character;
    use tables_core::CharacterClass;

    fn session() -> GameSession {
        let hero = create_character("Ana", CharacterClass::Warrior).unwrap();
        GameSession::new(hero, StoryEngine::builtin().unwrap())
    }

    #[test]
    fn test_new_session() {
        let s = session();
        assert_eq!(s.location, "millbrook");
        assert!(!s.inventory.is_empty());
        assert!(s.quests.get("welcome_to_millbrook").is_some());
        assert_eq!(s.achievements.total_unlocked(), 0);
        assert!(s.combat.is_none());
    }

    #[test]
    fn test_choice_updates_location() {
        let mut s = session();
        s.make_choice(1);
        assert_eq!(s.location, "tavern");
        s.make_choice(0);
        assert_eq!(s.location, "tavern");
        assert!(!s.make_choice(42).moved);
    }

    #[test]
    fn test_quest_rewards_granted_on_completion() {
        let mut s = session();
        let gold = s.character.gold;
        s.quests.activate("welcome_to_millbrook");

        assert_eq!(
            s.advance_objective("welcome_to_millbrook", "visit_tavern", 1),
            ObjectiveUpdate::Progressed
        );
        let update = s.advance_objective("welcome_to_millbrook", "visit_marketplace", 1);
        assert!(matches!(update, ObjectiveUpdate::QuestCompleted(_)));
        assert_eq!(s.character.experience, 50);
        assert_eq!(s.character.gold, gold + 25);
        assert_eq!(s.achievements.get("quest_master").unwrap().progress, 1);
    }

    #[test]
    fn test_complete_requires_active() {
        let mut s = session();
        assert!(!s.complete_quest("gather_supplies"));
        s.quests.activate("gather_supplies");
        assert!(s.complete_quest("gather_supplies"));
        assert_eq!(s.character.experience, 75);
    }

    #[test]
    fn test_flags() {
        let mut s = session();
        assert!(!s.flag("bridge_burned"));
        s.set_flag("bridge_burned", true);
        assert!(s.flag("bridge_burned"));
    }

    #[test]
    fn test_save_then_load_restores() {
        let mut store = MemoryStore::new();
        let slot = SaveSlot::new(1).unwrap();
        let mut s = session();
        s.make_choice(2);
        s.set_flag("met_merchant", true);
        s.save(&mut store, slot).unwrap();

        let mut other = session();
        assert!(other.load(&store, slot).unwrap());
        assert_eq!(other.location, "marketplace");
        assert!(other.flag("met_merchant"));
        assert_eq!(other.story.current_node_id(), "marketplace");
        assert_eq!(other.character, s.character);
    }

    #[test]
    fn test_load_empty_slot_keeps_state() {
        let store = MemoryStore::new();
        let mut s = session();
        s.make_choice(1);
        assert!(!s.load(&store, SaveSlot::new(4).unwrap()).unwrap());
        assert_eq!(s.location, "tavern");
    }
}
