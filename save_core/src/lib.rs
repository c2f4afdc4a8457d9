//! save_core - Game persistence for Aethermoor
//!
//! - `SaveRecord`: everything needed to resume a playthrough
//! - `SaveStore`: numbered save slots, in memory or as JSON files
//! - `export_record` / `import_record`: single-record backup documents
//! - `QuestLog`, `AchievementTracker`: live quest and achievement state
//! - `GameSession`: the playthrough a save record is taken from

pub mod achievements;
pub mod export;
pub mod quest_log;
pub mod record;
pub mod session;
pub mod store;

pub use achievements::{Achievement, AchievementTracker};
pub use export::{export_record, import_record};
pub use quest_log::{ObjectiveUpdate, QuestLog};
pub use record::{SaveRecord, SaveSummary, SAVE_VERSION};
pub use session::GameSession;
pub use store::{JsonDirStore, MemoryStore, SaveSlot, SaveStore, MAX_SLOTS};

use std::path::PathBuf;
use thiserror::Error;

/// Error from a save store or an export document
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error on '{path}': {error}")]
    Io {
        error: std::io::Error,
        path: PathBuf,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid save slot {0} (expected 1 to {})", MAX_SLOTS)]
    InvalidSlot(u8),
    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}
