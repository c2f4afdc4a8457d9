//! Backup documents for a single save record

use crate::record::{SaveRecord, SAVE_VERSION};
use crate::PersistError;
use serde::Deserialize;

pub(crate) fn to_pretty_json(record: &SaveRecord) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Parse a record, rejecting other save format versions
pub(crate) fn parse_record(content: &str) -> Result<SaveRecord, PersistError> {
    // Other versions may not match the current layout, so check first
    #[derive(Deserialize)]
    struct Header {
        version: u32,
    }

    let header: Header = serde_json::from_str(content)?;
    if header.version != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found: header.version,
        });
    }
    Ok(serde_json::from_str(content)?)
}

/// Self-describing JSON document for out-of-band backup
pub fn export_record(record: &SaveRecord) -> Result<String, PersistError> {
    to_pretty_json(record)
}

pub fn import_record(document: &str) -> Result<SaveRecord, PersistError> {
    parse_record(document)
}
