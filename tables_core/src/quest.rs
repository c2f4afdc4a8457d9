use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestStatus {
    #[default]
    Available,
    Active,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveKind {
    Kill,
    Collect,
    ReachLocation,
    TalkToNpc,
    UseItem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ObjectiveKind,
    pub target: String,
    #[serde(default)]
    pub current: u32,
    pub required: u32,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestRewards {
    #[serde(default)]
    pub experience: u32,
    #[serde(default)]
    pub gold: u32,
    /// Catalogue ids granted on completion
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlock_spell: Option<String>,
}

/// Quest template, and its live state once copied into a quest log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub objectives: Vec<QuestObjective>,
    #[serde(default)]
    pub rewards: QuestRewards,
    #[serde(default)]
    pub status: QuestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub giver: Option<String>,
    pub level: u32,
    #[serde(default)]
    pub main_quest: bool,
}

impl Quest {
    /// Offered when available and at most two levels above the player
    pub fn is_offered_at(&self, player_level: u32) -> bool {
        self.status == QuestStatus::Available && self.level <= player_level + 2
    }

    pub fn all_objectives_complete(&self) -> bool {
        self.objectives.iter().all(|o| o.completed)
    }

    /// Set an objective's progress, clamped to its requirement.
    ///
    /// Completes the quest once every objective is done. Only active quests
    /// make progress; returns whether anything changed.
    pub fn set_objective_progress(&mut self, objective_id: &str, progress: u32) -> bool {
        if self.status != QuestStatus::Active {
            return false;
        }
        let Some(objective) = self.objectives.iter_mut().find(|o| o.id == objective_id) else {
            return false;
        };

        objective.current = progress.min(objective.required);
        objective.completed = objective.current >= objective.required;

        if self.all_objectives_complete() {
            self.status = QuestStatus::Completed;
        }
        true
    }
}
