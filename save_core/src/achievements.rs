//! Achievement progress tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tables_core::{AchievementDef, GameTables};
use tracing::info;

/// An achievement definition with the player's progress toward it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    #[serde(flatten)]
    pub def: AchievementDef,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Achievement {
    pub fn new(def: AchievementDef) -> Self {
        Achievement {
            def,
            progress: 0,
            unlocked: false,
            unlocked_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.def.id
    }

    fn unlock_now(&mut self) {
        self.progress = self.def.required;
        self.unlocked = true;
        self.unlocked_at = Some(Utc::now());
        info!(achievement = %self.def.id, "achievement unlocked");
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AchievementTracker {
    achievements: Vec<Achievement>,
}

impl AchievementTracker {
    pub fn new(achievements: Vec<Achievement>) -> Self {
        AchievementTracker { achievements }
    }

    /// Every achievement in `tables`, all locked
    pub fn from_tables(tables: &GameTables) -> Self {
        Self::new(
            tables
                .achievements()
                .iter()
                .cloned()
                .map(Achievement::new)
                .collect(),
        )
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.def.id == id)
    }

    pub fn all(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn into_vec(self) -> Vec<Achievement> {
        self.achievements
    }

    /// Add `amount` of progress, clamped to the requirement.
    ///
    /// Returns true when this call unlocked the achievement. Unlocked and
    /// unknown achievements are left alone.
    pub fn update_progress(&mut self, id: &str, amount: u32) -> bool {
        let Some(achievement) = self
            .achievements
            .iter_mut()
            .find(|a| a.def.id == id && !a.unlocked)
        else {
            return false;
        };

        achievement.progress = achievement
            .progress
            .saturating_add(amount)
            .min(achievement.def.required);
        if achievement.progress >= achievement.def.required {
            achievement.unlock_now();
            return true;
        }
        false
    }

    /// Unlock outright. Returns false if unknown or already unlocked.
    pub fn unlock(&mut self, id: &str) -> bool {
        match self
            .achievements
            .iter_mut()
            .find(|a| a.def.id == id && !a.unlocked)
        {
            Some(achievement) => {
                achievement.unlock_now();
                true
            }
            None => false,
        }
    }

    pub fn unlocked(&self) -> Vec<&Achievement> {
        self.achievements.iter().filter(|a| a.unlocked).collect()
    }

    /// Locked achievements that are not hidden
    pub fn locked(&self) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| !a.unlocked && !a.def.hidden)
            .collect()
    }

    pub fn total_unlocked(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> AchievementTracker {
        AchievementTracker::from_tables(&GameTables::builtin().unwrap())
    }

    #[test]
    fn test_progress_clamps_and_unlocks() {
        let mut t = tracker();
        assert!(!t.update_progress("monster_slayer", 30));
        assert_eq!(t.get("monster_slayer").unwrap().progress, 30);

        assert!(t.update_progress("monster_slayer", 30));
        let slayer = t.get("monster_slayer").unwrap();
        assert_eq!(slayer.progress, 50);
        assert!(slayer.unlocked);
        assert!(slayer.unlocked_at.is_some());

        assert!(!t.update_progress("monster_slayer", 1));
        assert!(!t.update_progress("no_such_thing", 1));
    }

    #[test]
    fn test_unlock_once() {
        let mut t = tracker();
        assert!(t.unlock("first_blood"));
        assert!(!t.unlock("first_blood"));
        assert_eq!(t.get("first_blood").unwrap().progress, 1);
        assert_eq!(t.total_unlocked(), 1);
    }

    #[test]
    fn test_hidden_not_listed_until_unlocked() {
        let mut t = tracker();
        assert!(t.locked().iter().all(|a| a.id() != "explorer"));

        t.unlock("explorer");
        assert!(t.unlocked().iter().any(|a| a.id() == "explorer"));
    }

    #[test]
    fn test_json_shape_is_flat() {
        let mut t = tracker();
        t.unlock("first_blood");
        let json = serde_json::to_value(t.get("first_blood").unwrap()).unwrap();
        assert_eq!(json["id"], "first_blood");
        assert_eq!(json["unlocked"], true);

        let back: Achievement = serde_json::from_value(json).unwrap();
        assert_eq!(&back, t.get("first_blood").unwrap());
    }
}
