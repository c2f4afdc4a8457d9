//! Story progress persistence port

use crate::variables::Variables;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Error from a progress store backend
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Progress store unavailable: {0}")]
    Unavailable(String),
    #[error("Corrupt progress record for '{key}': {message}")]
    Corrupt { key: String, message: String },
}

/// Where a playthrough stands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryProgress {
    pub current_node: String,
    #[serde(default)]
    pub variables: Variables,
    /// Distinct node ids in order of first visit
    #[serde(default)]
    pub visited: Vec<String>,
}

/// Keyed storage for story progress
pub trait ProgressStore {
    fn get(&self, key: &str) -> Result<Option<StoryProgress>, StoreError>;
    fn set(&mut self, key: &str, progress: &StoryProgress) -> Result<(), StoreError>;
    fn delete(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    records: HashMap<String, StoryProgress>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn get(&self, key: &str) -> Result<Option<StoryProgress>, StoreError> {
        Ok(self.records.get(key).cloned())
    }

    fn set(&mut self, key: &str, progress: &StoryProgress) -> Result<(), StoreError> {
        self.records.insert(key.to_string(), progress.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<(), StoreError> {
        self.records.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryProgressStore::new();
        let progress = StoryProgress {
            current_node: "tavern_scene".to_string(),
            variables: Variables::new(),
            visited: vec!["start".to_string(), "tavern_scene".to_string()],
        };

        assert_eq!(store.get("story").unwrap(), None);
        store.set("story", &progress).unwrap();
        assert_eq!(store.get("story").unwrap(), Some(progress));
        store.delete("story").unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_progress_json_defaults() {
        let progress: StoryProgress =
            serde_json::from_str(r#"{ "current_node": "start" }"#).unwrap();
        assert!(progress.variables.is_empty());
        assert!(progress.visited.is_empty());
    }
}
