//! Live quest state

use serde::{Deserialize, Serialize};
use tables_core::{GameTables, Quest, QuestRewards, QuestStatus};
use tracing::{debug, info};

/// Result of advancing an objective
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectiveUpdate {
    /// Unknown quest or objective, or the quest is not active
    Unchanged,
    Progressed,
    /// The last objective finished; the quest's rewards are due
    QuestCompleted(QuestRewards),
}

/// The player's copy of every quest, with status and objective progress.
///
/// Status only moves forward: available, then active, then completed or
/// failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestLog {
    quests: Vec<Quest>,
}

impl QuestLog {
    pub fn new(quests: Vec<Quest>) -> Self {
        QuestLog { quests }
    }

    pub fn from_tables(tables: &GameTables) -> Self {
        Self::new(tables.quests().to_vec())
    }

    pub fn get(&self, id: &str) -> Option<&Quest> {
        self.quests.iter().find(|q| q.id == id)
    }

    pub fn all(&self) -> &[Quest] {
        &self.quests
    }

    pub fn into_vec(self) -> Vec<Quest> {
        self.quests
    }

    fn with_status_mut(&mut self, id: &str, status: QuestStatus) -> Option<&mut Quest> {
        self.quests
            .iter_mut()
            .find(|q| q.id == id && q.status == status)
    }

    /// Start an available quest
    pub fn activate(&mut self, id: &str) -> bool {
        match self.with_status_mut(id, QuestStatus::Available) {
            Some(quest) => {
                quest.status = QuestStatus::Active;
                info!(quest = id, "quest activated");
                true
            }
            None => false,
        }
    }

    /// Complete an active quest, returning its rewards
    pub fn complete(&mut self, id: &str) -> Option<QuestRewards> {
        let quest = self.with_status_mut(id, QuestStatus::Active)?;
        quest.status = QuestStatus::Completed;
        info!(quest = id, "quest completed");
        Some(quest.rewards.clone())
    }

    /// Fail an active quest
    pub fn fail(&mut self, id: &str) -> bool {
        match self.with_status_mut(id, QuestStatus::Active) {
            Some(quest) => {
                quest.status = QuestStatus::Failed;
                info!(quest = id, "quest failed");
                true
            }
            None => false,
        }
    }

    /// Add `amount` to an objective of an active quest, clamped to its
    /// requirement. The quest completes when every objective is done.
    pub fn update_objective(&mut self, quest_id: &str, objective_id: &str, amount: u32) -> ObjectiveUpdate {
        let Some(quest) = self.with_status_mut(quest_id, QuestStatus::Active) else {
            return ObjectiveUpdate::Unchanged;
        };
        let Some(current) = quest
            .objectives
            .iter()
            .find(|o| o.id == objective_id)
            .map(|o| o.current)
        else {
            return ObjectiveUpdate::Unchanged;
        };

        quest.set_objective_progress(objective_id, current.saturating_add(amount));
        debug!(quest = quest_id, objective = objective_id, amount, "objective advanced");

        if quest.status == QuestStatus::Completed {
            info!(quest = quest_id, "quest completed");
            return ObjectiveUpdate::QuestCompleted(quest.rewards.clone());
        }
        ObjectiveUpdate::Progressed
    }

    pub fn active(&self) -> Vec<&Quest> {
        self.by_status(QuestStatus::Active)
    }

    pub fn completed(&self) -> Vec<&Quest> {
        self.by_status(QuestStatus::Completed)
    }

    /// Quests that can be started at `player_level`
    pub fn available(&self, player_level: u32) -> Vec<&Quest> {
        self.quests
            .iter()
            .filter(|q| q.is_offered_at(player_level))
            .collect()
    }

    fn by_status(&self, status: QuestStatus) -> Vec<&Quest> {
        self.quests.iter().filter(|q| q.status == status).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log() -> QuestLog {
        QuestLog::from_tables(&GameTables::builtin().unwrap())
    }

    #[test]
    fn test_activate_only_available() {
        let mut log = log();
        assert!(log.activate("welcome_to_millbrook"));
        assert!(!log.activate("welcome_to_millbrook"));
        assert!(!log.activate("missing"));
        assert_eq!(log.active().len(), 1);
    }

    #[test]
    fn test_fail_is_one_way() {
        let mut log = log();
        assert!(!log.fail("gather_supplies"));

        log.activate("gather_supplies");
        assert!(log.fail("gather_supplies"));
        assert!(!log.activate("gather_supplies"));
        assert_eq!(log.complete("gather_supplies"), None);
        assert_eq!(log.get("gather_supplies").unwrap().status, QuestStatus::Failed);
    }

    #[test]
    fn test_objectives_accumulate_and_complete() {
        let mut log = log();
        assert_eq!(
            log.update_objective("gather_supplies", "collect_potions", 1),
            ObjectiveUpdate::Unchanged
        );

        log.activate("gather_supplies");
        assert_eq!(
            log.update_objective("gather_supplies", "collect_potions", 2),
            ObjectiveUpdate::Progressed
        );
        assert_eq!(
            log.update_objective("gather_supplies", "collect_potions", 5),
            ObjectiveUpdate::Progressed
        );
        assert_eq!(log.get("gather_supplies").unwrap().objectives[0].current, 3);

        let rewards = match log.update_objective("gather_supplies", "collect_bread", 5) {
            ObjectiveUpdate::QuestCompleted(rewards) => rewards,
            other => panic!("expected completion, got {:?}", other),
        };
        assert!(rewards.experience > 0);
        assert_eq!(log.completed().len(), 1);
        assert_eq!(
            log.update_objective("gather_supplies", "collect_bread", 1),
            ObjectiveUpdate::Unchanged
        );
    }

    #[test]
    fn test_available_by_level() {
        let log = log();
        let ids: Vec<&str> = log.available(1).iter().map(|q| q.id.as_str()).collect();
        assert!(ids.contains(&"welcome_to_millbrook"));
        assert!(!ids.contains(&"confront_malachar"));
    }
}
