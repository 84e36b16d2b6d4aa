#![warn(clippy::all, clippy::pedantic)]

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, Utc};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

use crate::events::{GameEvent, GameObserver, GameRecord};
use crate::progression::Difficulty;

// Most recent games kept in the history
pub const MAX_RECORDS: usize = 20;

const RECORDS_FILE_PATH: &str = "phasefall_records.toml";
const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A finished game as stored in the history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub game: GameRecord,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct RecordFile {
    #[serde(default)]
    records: Vec<StoredRecord>,
}

/// Match history, most recent first, capped at [`MAX_RECORDS`].
#[derive(Debug)]
pub struct RecordStore {
    path: Option<PathBuf>,
    records: Vec<StoredRecord>,
    rng: fastrand::Rng,
}

impl RecordStore {
    /// Opens the history stored at `path`. A missing or unparsable file is an
    /// empty history; the next save overwrites it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, RecordError> {
        let path = path.into();
        let records = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match toml::from_str::<RecordFile>(&contents) {
                Ok(file) => file.records,
                Err(e) => {
                    warn!("Ignoring unreadable game records in {}: {e}", path.display());
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        info!("Loaded {} game records from {}", records.len(), path.display());

        Ok(Self {
            path: Some(path),
            records,
            rng: fastrand::Rng::new(),
        })
    }

    /// A history that lives only as long as the store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: Vec::new(),
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn default_path() -> PathBuf {
        dirs::data_dir().map_or_else(
            || PathBuf::from(RECORDS_FILE_PATH),
            |dir| dir.join("phasefall").join("records.toml"),
        )
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Stamps `record` with an id and the current time and puts it at the front
    /// of the history, dropping the oldest entries past the cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the history cannot be written back to disk.
    pub fn save(&mut self, record: GameRecord) -> Result<&StoredRecord, RecordError> {
        let timestamp = now_millis();
        let stored = StoredRecord {
            id: self.generate_id(timestamp),
            timestamp,
            game: record,
        };

        self.records.insert(0, stored);
        self.records.truncate(MAX_RECORDS);
        self.persist()?;
        Ok(&self.records[0])
    }

    #[must_use]
    pub fn records(&self) -> &[StoredRecord] {
        &self.records
    }

    /// Best score recorded at `difficulty`.
    #[must_use]
    pub fn high_score(&self, difficulty: Difficulty) -> Option<&StoredRecord> {
        self.records
            .iter()
            .filter(|r| r.game.difficulty == difficulty)
            .max_by_key(|r| r.game.score)
    }

    /// Number of won games, at one difficulty or across all of them.
    #[must_use]
    pub fn victory_count(&self, difficulty: Option<Difficulty>) -> usize {
        self.records
            .iter()
            .filter(|r| r.game.is_victory && difficulty.is_none_or(|d| r.game.difficulty == d))
            .count()
    }

    /// # Errors
    ///
    /// Returns an error if the emptied history cannot be written back to disk.
    pub fn clear(&mut self) -> Result<(), RecordError> {
        self.records.clear();
        self.persist()
    }

    fn persist(&self) -> Result<(), RecordError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = RecordFile {
            records: self.records.clone(),
        };
        fs::write(path, toml::to_string_pretty(&file)?)?;
        Ok(())
    }

    fn generate_id(&mut self, timestamp: u64) -> String {
        let suffix: String = (0..9)
            .map(|_| char::from(ID_ALPHABET[self.rng.usize(..ID_ALPHABET.len())]))
            .collect();
        format!("{timestamp}-{suffix}")
    }
}

impl GameObserver for RecordStore {
    fn on_event(&mut self, event: &GameEvent) {
        if let GameEvent::Finished(record) = event {
            match self.save(record.clone()) {
                Ok(stored) => info!("Recorded game {}", stored.id),
                Err(e) => error!("Failed to record game: {e}"),
            }
        }
    }
}

fn now_millis() -> u64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        Err(_) => {
            warn!("System clock is before the Unix epoch");
            0
        }
    }
}

/// Formats a millisecond Unix timestamp as local `YYYY-MM-DD HH:MM`.
#[must_use]
pub fn format_timestamp(timestamp: u64) -> String {
    i64::try_from(timestamp)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map_or_else(
            || String::from("unknown"),
            |time| time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        )
}

/// Formats a duration in seconds as `m:ss`.
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

#[derive(Debug)]
pub enum RecordError {
    Io(io::Error),
    Serialize(toml::ser::Error),
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::Io(err) => write!(f, "record store i/o error: {err}"),
            RecordError::Serialize(err) => write!(f, "could not serialize records: {err}"),
        }
    }
}

impl std::error::Error for RecordError {}

impl From<io::Error> for RecordError {
    fn from(err: io::Error) -> Self {
        RecordError::Io(err)
    }
}

impl From<toml::ser::Error> for RecordError {
    fn from(err: toml::ser::Error) -> Self {
        RecordError::Serialize(err)
    }
}
