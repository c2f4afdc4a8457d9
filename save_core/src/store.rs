//! Save-slot persistence port and its backends

use crate::export::{parse_record, to_pretty_json};
use crate::record::SaveRecord;
use crate::PersistError;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Number of save slots
pub const MAX_SLOTS: u8 = 5;

/// A validated slot number, 1 to [`MAX_SLOTS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SaveSlot(u8);

impl SaveSlot {
    pub fn new(number: u8) -> Result<Self, PersistError> {
        if (1..=MAX_SLOTS).contains(&number) {
            Ok(SaveSlot(number))
        } else {
            Err(PersistError::InvalidSlot(number))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = SaveSlot> {
        (1..=MAX_SLOTS).map(SaveSlot)
    }
}

impl fmt::Display for SaveSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot {}", self.0)
    }
}

/// Keyed storage for save records, one per slot
pub trait SaveStore {
    /// Write `record` to `slot`, replacing what was there
    fn save(&mut self, slot: SaveSlot, record: &SaveRecord) -> Result<(), PersistError>;
    fn load(&self, slot: SaveSlot) -> Result<Option<SaveRecord>, PersistError>;
    /// Deleting an empty slot is not an error
    fn delete(&mut self, slot: SaveSlot) -> Result<(), PersistError>;
    /// Every stored record, by slot
    fn list(&self) -> Result<Vec<SaveRecord>, PersistError>;
}

fn stamped(slot: SaveSlot, record: &SaveRecord) -> SaveRecord {
    let mut record = record.clone();
    record.save_slot = slot.number();
    record
}

/// In-process store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: BTreeMap<SaveSlot, SaveRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn save(&mut self, slot: SaveSlot, record: &SaveRecord) -> Result<(), PersistError> {
        self.records.insert(slot, stamped(slot, record));
        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<SaveRecord>, PersistError> {
        Ok(self.records.get(&slot).cloned())
    }

    fn delete(&mut self, slot: SaveSlot) -> Result<(), PersistError> {
        self.records.remove(&slot);
        Ok(())
    }

    fn list(&self) -> Result<Vec<SaveRecord>, PersistError> {
        Ok(self.records.values().cloned().collect())
    }
}

/// One pretty-printed JSON file per slot in a directory
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

impl JsonDirStore {
    /// Use `dir` for save files, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|error| PersistError::Io {
            error,
            path: dir.clone(),
        })?;
        Ok(JsonDirStore { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn slot_path(&self, slot: SaveSlot) -> PathBuf {
        self.dir.join(format!("slot_{}.json", slot.number()))
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> PersistError + '_ {
    move |error| PersistError::Io {
        error,
        path: path.to_path_buf(),
    }
}

impl SaveStore for JsonDirStore {
    fn save(&mut self, slot: SaveSlot, record: &SaveRecord) -> Result<(), PersistError> {
        let path = self.slot_path(slot);
        let tmp = path.with_extension("json.tmp");
        let content = to_pretty_json(&stamped(slot, record))?;

        fs::write(&tmp, content).map_err(io_error(&tmp))?;
        if let Err(error) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                warn!(path = %tmp.display(), error = %cleanup, "could not remove temporary save");
            }
            return Err(io_error(&path)(error));
        }
        debug!(path = %path.display(), "save written");
        Ok(())
    }

    fn load(&self, slot: SaveSlot) -> Result<Option<SaveRecord>, PersistError> {
        let path = self.slot_path(slot);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(error) if error.kind() == ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(io_error(&path)(error)),
        };
        parse_record(&content).map(Some)
    }

    fn delete(&mut self, slot: SaveSlot) -> Result<(), PersistError> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(io_error(&path)(error)),
        }
    }

    /// Unreadable slots are skipped with a warning
    fn list(&self) -> Result<Vec<SaveRecord>, PersistError> {
        let mut records = Vec::new();
        for slot in SaveSlot::all() {
            match self.load(slot) {
                Ok(Some(record)) => records.push(record),
                Ok(None) => {}
                Err(error) => warn!(%slot, %error, "skipping unreadable save"),
            }
        }
        Ok(records)
    }
}
