//! Ledger persistence for the CLI host
//!
//! The ledger itself has no durability format of its own; the host
//! snapshots the whole state as a single JSON document per data directory.
//! Saves go through a temp file and rename so a crash mid-write never
//! leaves a torn snapshot, and each save demotes the previous snapshot to
//! a numbered backup.

use crate::ledger::Ledger;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// File name of the live snapshot inside the data directory.
const LEDGER_FILE: &str = "ledger.json";

/// How many demoted snapshots to keep around.
const DEFAULT_MAX_BACKUPS: usize = 5;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("No ledger snapshot found at {0}")]
    NotInitialized(PathBuf),
}

/// Snapshot store for one ledger instance.
pub struct Storage {
    data_dir: PathBuf,
    max_backups: usize,
}

impl Storage {
    /// Open a data directory, creating it if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self {
            data_dir,
            max_backups: DEFAULT_MAX_BACKUPS,
        })
    }

    /// Override the number of retained backups (zero disables them).
    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }

    fn backup_path(&self, index: usize) -> PathBuf {
        self.data_dir.join(format!("{}.backup.{}", LEDGER_FILE, index))
    }

    /// Whether a ledger snapshot exists in this data directory.
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Save the ledger, demoting the previous snapshot to backup 0.
    pub fn save(&self, ledger: &Ledger) -> Result<(), StorageError> {
        // Serialize before touching anything on disk
        let json = serde_json::to_vec_pretty(ledger)?;

        let path = self.ledger_path();
        if path.exists() && self.max_backups > 0 {
            self.shift_backups()?;
            fs::copy(&path, self.backup_path(0))?;
        }

        let tmp = self.data_dir.join(format!("{}.tmp", LEDGER_FILE));
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;

        Ok(())
    }

    /// Load the ledger from its snapshot.
    pub fn load(&self) -> Result<Ledger, StorageError> {
        let path = self.ledger_path();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StorageError::NotInitialized(path));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Shift each backup one slot older; the rename over the last slot
    /// drops the oldest snapshot.
    fn shift_backups(&self) -> Result<(), StorageError> {
        for i in (0..self.max_backups - 1).rev() {
            let current = self.backup_path(i);
            if current.exists() {
                fs::rename(&current, self.backup_path(i + 1))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backup_count(dir: &std::path::Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().contains(".backup."))
            .count()
    }

    #[test]
    fn test_save_load_ledger() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap();

        let mut ledger = Ledger::new("Bad Token".to_string(), "BAD".to_string());
        ledger.mint("alice", 1000).unwrap();
        ledger.approve("alice", "bob", 250).unwrap();

        storage.save(&ledger).unwrap();
        assert!(storage.exists());

        let loaded = storage.load().unwrap();
        assert_eq!(loaded.name(), "Bad Token");
        assert_eq!(loaded.symbol(), "BAD");
        assert_eq!(loaded.total_supply(), 1000);
        assert_eq!(loaded.balance_of("alice"), 1000);
        assert_eq!(loaded.allowance("alice", "bob"), 250);
        assert_eq!(loaded.events().len(), ledger.events().len());
    }

    #[test]
    fn test_load_missing_snapshot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap();

        assert!(!storage.exists());
        assert!(matches!(
            storage.load(),
            Err(StorageError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_backups_capped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap().with_max_backups(3);

        let mut ledger = Ledger::new("Bad Token".to_string(), "BAD".to_string());

        // First save has nothing to demote; the next five produce backups
        for i in 0..6u128 {
            ledger.mint("alice", 100 + i).unwrap();
            storage.save(&ledger).unwrap();
        }

        assert_eq!(backup_count(temp_dir.path()), 3);

        // The live snapshot is always the newest state
        let loaded = storage.load().unwrap();
        assert_eq!(loaded.total_supply(), ledger.total_supply());
    }

    #[test]
    fn test_backups_disabled() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(temp_dir.path()).unwrap().with_max_backups(0);

        let mut ledger = Ledger::new("Bad Token".to_string(), "BAD".to_string());
        for _ in 0..3 {
            ledger.mint("alice", 10).unwrap();
            storage.save(&ledger).unwrap();
        }

        assert_eq!(backup_count(temp_dir.path()), 0);
        assert_eq!(storage.load().unwrap().total_supply(), 30);
    }
}
