//! Save-game persistence.
//!
//! The snapshot ([`SaveData`]) captures exactly the player record and the
//! three mission collections, plus elapsed play time, a timestamp, and a
//! version tag. On disk it is JSON at `<data_dir>/save.json`, written with
//! an advisory lock and an atomic write+rename so a crash mid-save never
//! leaves a torn file.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::game::missions::MissionBoard;
use crate::game::player::PlayerProgress;
use crate::game::types::{Mission, Player};
use crate::game::GameEngine;

/// Errors from the save/load layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("save file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// One complete game snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveData {
    pub player: Player,
    pub available_missions: Vec<Mission>,
    pub active_mission: Option<Mission>,
    pub completed_missions: Vec<Mission>,
    /// Elapsed play time in seconds.
    pub play_time: u64,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl SaveData {
    /// Snapshot the engine's stores.
    pub fn export(engine: &GameEngine, play_time: u64) -> Self {
        let board = engine.board();
        SaveData {
            player: engine.player().player().clone(),
            available_missions: board.available().to_vec(),
            active_mission: board.active().cloned(),
            completed_missions: board.completed().to_vec(),
            play_time,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Restore the snapshot into the engine's stores.
    pub fn import(self, engine: &mut GameEngine) {
        *engine.player_mut() = PlayerProgress::from_player(self.player);
        *engine.board_mut() = MissionBoard::from_parts(
            self.available_missions,
            self.active_mission,
            self.completed_missions,
        );
    }
}

/// Compact summary of an on-disk save, for menus and `status` output.
#[derive(Debug, Clone)]
pub struct SaveInfo {
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub player_level: u32,
    pub play_time: u64,
}

/// A save slot rooted at a data directory.
#[derive(Debug, Clone)]
pub struct SaveStore {
    dir: PathBuf,
}

impl SaveStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        SaveStore { dir: dir.into() }
    }

    fn save_path(&self) -> PathBuf {
        self.dir.join("save.json")
    }

    pub fn exists(&self) -> bool {
        self.save_path().is_file()
    }

    /// Write the snapshot. Locks the target, writes a temp file, renames.
    pub fn save(&self, data: &SaveData) -> Result<(), StorageError> {
        let path = self.save_path();
        let json = serde_json::to_string_pretty(data)?;
        write_atomic(&path, &json)?;
        info!("saved game (level {}) to {}", data.player.level, path.display());
        Ok(())
    }

    /// Load the snapshot, or `None` when no save exists yet.
    pub fn load(&self) -> Result<Option<SaveData>, StorageError> {
        let path = self.save_path();
        if !path.is_file() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(&path)?;
        let data: SaveData = serde_json::from_str(&json)?;
        if data.version.is_empty() {
            warn!("save file {} has an empty version tag", path.display());
        }
        Ok(Some(data))
    }

    /// Remove the save file. Returns whether one was present.
    pub fn delete(&self) -> Result<bool, StorageError> {
        let path = self.save_path();
        if !path.is_file() {
            return Ok(false);
        }
        std::fs::remove_file(&path)?;
        Ok(true)
    }

    /// Summary of the save on disk, without restoring it.
    pub fn save_info(&self) -> Result<Option<SaveInfo>, StorageError> {
        Ok(self.load()?.map(|data| SaveInfo {
            timestamp: data.timestamp,
            version: data.version,
            player_level: data.player.level,
            play_time: data.play_time,
        }))
    }
}

fn write_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;
    // Exclusive lock on the target (created if missing) guards against a
    // second process saving the same slot.
    let lock_file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .open(path)?;
    lock_file.lock_exclusive()?;
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("save.json");
    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                let _ = tmp.flush();
                let _ = tmp.sync_all();
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };
    std::fs::rename(&tmp_path, path)?;
    if let Ok(dirf) = File::open(dir) {
        let _ = dirf.sync_all();
    }
    drop(lock_file);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());
        assert!(!store.exists());

        let engine = GameEngine::with_seed(42);
        let data = SaveData::export(&engine, 300);
        store.save(&data).unwrap();
        assert!(store.exists());

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.player, *engine.player().player());
        assert_eq!(loaded.available_missions.len(), engine.board().available().len());
        assert_eq!(loaded.play_time, 300);
        assert_eq!(loaded.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn load_missing_save_is_none() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn corrupt_save_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());
        std::fs::write(dir.path().join("save.json"), "{not json").unwrap();
        assert!(matches!(store.load(), Err(StorageError::Corrupt(_))));
    }

    #[test]
    fn import_restores_stores() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());

        let mut engine = GameEngine::with_seed(42);
        engine.player_mut().add_exp(120);
        let active_id = engine.board().available()[0].id;
        engine.board_mut().accept_mission(active_id);
        store.save(&SaveData::export(&engine, 10)).unwrap();

        let mut restored = GameEngine::with_seed(7);
        store.load().unwrap().unwrap().import(&mut restored);
        assert_eq!(restored.player().player().level, 2);
        assert_eq!(restored.board().active().unwrap().id, active_id);
    }

    #[test]
    fn delete_reports_prior_presence() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());
        assert!(!store.delete().unwrap());
        let engine = GameEngine::with_seed(1);
        store.save(&SaveData::export(&engine, 0)).unwrap();
        assert!(store.delete().unwrap());
        assert!(!store.exists());
    }

    #[test]
    fn save_info_summarizes_snapshot() {
        let dir = TempDir::new().unwrap();
        let store = SaveStore::new(dir.path());
        assert!(store.save_info().unwrap().is_none());
        let engine = GameEngine::with_seed(1);
        store.save(&SaveData::export(&engine, 99)).unwrap();
        let info = store.save_info().unwrap().unwrap();
        assert_eq!(info.player_level, 1);
        assert_eq!(info.play_time, 99);
    }
}
