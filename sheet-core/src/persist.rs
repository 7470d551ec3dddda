//! Record persistence.
//!
//! The record is serialized as one JSON blob under a fixed storage key in a
//! key-value store. The [`SheetStore`] trait is the seam to the host's
//! durable storage; [`MemoryStore`] backs tests and [`FileStore`] maps keys
//! to JSON files in a directory.

use crate::record::CharacterRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::debug;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current save format version.
const SAVE_VERSION: u32 = 1;

/// The fixed slot the record is persisted under.
pub const STORAGE_KEY: &str = "rpg_hero_data_v1";

/// A key-value storage slot for serialized records.
///
/// The presentation host supplies the durable store; these three methods
/// are its entire contract. `put` overwrites, `remove` is idempotent.
pub trait SheetStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistError>;
}

/// The persisted envelope: record plus version and peekable metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedRecord {
    /// Save format version for compatibility checking.
    pub version: u32,

    /// When the save was created (epoch seconds).
    pub saved_at: String,

    /// The complete character record.
    pub record: CharacterRecord,

    /// Quick-access metadata about the record.
    pub metadata: RecordMetadata,
}

/// Metadata about a saved record for quick display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub name: String,
    pub profession: String,
    pub tier: i32,
}

impl SavedRecord {
    pub fn new(record: CharacterRecord) -> Self {
        let metadata = RecordMetadata {
            name: record.name.clone(),
            profession: record.profession.clone(),
            tier: record.tier,
        };

        Self {
            version: SAVE_VERSION,
            saved_at: epoch_now(),
            record,
            metadata,
        }
    }
}

/// Persist the record, overwriting any previous value. Idempotent.
pub fn save_record<S: SheetStore>(store: &mut S, record: &CharacterRecord) -> Result<(), PersistError> {
    let saved = SavedRecord::new(record.clone());
    let content = serde_json::to_string_pretty(&saved)?;
    store.put(STORAGE_KEY, &content)?;
    debug!(name = %record.name, "record saved");
    Ok(())
}

/// Load the persisted record, if the slot holds one.
pub fn load_record<S: SheetStore>(store: &S) -> Result<Option<CharacterRecord>, PersistError> {
    let Some(content) = store.get(STORAGE_KEY)? else {
        return Ok(None);
    };

    let saved: SavedRecord = serde_json::from_str(&content)?;
    if saved.version != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found: saved.version,
        });
    }

    Ok(Some(saved.record))
}

/// Load the persisted record, falling back to a blank one when the slot is
/// empty or unreadable. This is the loading path the sheet itself uses:
/// stale or corrupt data never surfaces an error.
pub fn load_record_or_blank<S: SheetStore>(store: &S) -> CharacterRecord {
    match load_record(store) {
        Ok(Some(record)) => record,
        Ok(None) => CharacterRecord::blank(),
        Err(err) => {
            debug!(%err, "unreadable save, starting blank");
            CharacterRecord::blank()
        }
    }
}

/// Remove the persisted record.
pub fn clear_record<S: SheetStore>(store: &mut S) -> Result<(), PersistError> {
    store.remove(STORAGE_KEY)
}

/// Read metadata without deserializing the whole record.
pub fn peek_metadata<S: SheetStore>(store: &S) -> Result<Option<RecordMetadata>, PersistError> {
    #[derive(Deserialize)]
    struct Partial {
        version: u32,
        metadata: RecordMetadata,
    }

    let Some(content) = store.get(STORAGE_KEY)? else {
        return Ok(None);
    };

    let partial: Partial = serde_json::from_str(&content)?;
    if partial.version != SAVE_VERSION {
        return Err(PersistError::VersionMismatch {
            expected: SAVE_VERSION,
            found: partial.version,
        });
    }

    Ok(Some(partial.metadata))
}

fn epoch_now() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}", now.as_secs())
}

// ============================================================================
// Stores
// ============================================================================

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SheetStore for MemoryStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.slots.get(key).cloned())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        self.slots.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        let sanitized = key
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect::<String>();
        self.dir.join(format!("{sanitized}.json"))
    }
}

impl SheetStore for FileStore {
    fn put(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.key_path(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
