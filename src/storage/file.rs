//! File-based preference storage for Tally.
//!
//! Each key is stored as its own file in `~/.tally/prefs/`.
//! Atomic writes are achieved via temp file + rename pattern.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::config::prefs_dir;
use crate::error::{Result, TallyError};
use crate::storage::PrefStore;

/// File-based preference storage.
///
/// Stores each key as a separate file in a configurable directory.
/// Uses atomic writes via temp file + rename pattern, so a crashed write
/// never leaves a half-written value behind.
#[derive(Debug, Clone)]
pub struct FilePrefStore {
    /// Directory where preference files are stored.
    prefs_dir: PathBuf,
}

impl FilePrefStore {
    /// Create a new file preference store with the default directory.
    ///
    /// Uses `~/.tally/prefs/` or `$TALLY_HOME/prefs/`.
    pub fn new() -> Result<Self> {
        let dir = prefs_dir().ok_or_else(|| {
            TallyError::config("Could not determine prefs directory (no home directory)")
        })?;
        Self::with_dir(dir)
    }

    /// Create a new file preference store with a custom directory.
    pub fn with_dir(prefs_dir: impl Into<PathBuf>) -> Result<Self> {
        let prefs_dir = prefs_dir.into();

        if !prefs_dir.exists() {
            fs::create_dir_all(&prefs_dir).map_err(|e| TallyError::storage(&prefs_dir, e))?;
        }

        Ok(Self { prefs_dir })
    }

    /// Get the path for a key's file.
    fn key_path(&self, key: &str) -> PathBuf {
        self.prefs_dir.join(format!("{}.json", key))
    }

    /// Get the path for a temp file used during atomic writes.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.prefs_dir.join(format!(".{}.json.tmp", key))
    }
}

impl PrefStore for FilePrefStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|e| TallyError::storage(&path, e))?;

        Ok(Some(content))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let final_path = self.key_path(key);
        let temp_path = self.temp_path(key);

        {
            let mut file =
                fs::File::create(&temp_path).map_err(|e| TallyError::storage(&temp_path, e))?;
            file.write_all(value.as_bytes())
                .map_err(|e| TallyError::storage(&temp_path, e))?;
            file.sync_all()
                .map_err(|e| TallyError::storage(&temp_path, e))?;
        }

        // Rename temp file to final path (atomic on POSIX)
        fs::rename(&temp_path, &final_path).map_err(|e| TallyError::storage(&final_path, e))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);

        if path.exists() {
            fs::remove_file(&path).map_err(|e| TallyError::storage(&path, e))?;
        }

        // Also clean up any temp file
        let temp_path = self.temp_path(key);
        if temp_path.exists() {
            let _ = fs::remove_file(&temp_path);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::traits::tests::test_pref_store_crud;
    use tempfile::TempDir;

    fn create_test_store() -> (FilePrefStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = FilePrefStore::with_dir(dir.path()).unwrap();
        (store, dir)
    }

    #[test]
    fn test_file_pref_store_crud() {
        let (store, _dir) = create_test_store();
        test_pref_store_crud(&store);
    }

    #[test]
    fn test_with_dir_creates_directory() {
        let dir = TempDir::new().unwrap();
        let prefs_path = dir.path().join("prefs");

        assert!(!prefs_path.exists());

        let _store = FilePrefStore::with_dir(&prefs_path).unwrap();

        assert!(prefs_path.exists());
        assert!(prefs_path.is_dir());
    }

    #[test]
    fn test_key_path() {
        let (store, _dir) = create_test_store();

        let path = store.key_path("habit_history_v1");
        assert!(path.ends_with("habit_history_v1.json"));
    }

    #[test]
    fn test_get_nonexistent() {
        let (store, _dir) = create_test_store();

        assert!(store.get("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let (store, _dir) = create_test_store();

        store.set("best_streaks_v1", "{\"a\":1}").unwrap();
        store.set("best_streaks_v1", "{\"a\":2}").unwrap();

        assert_eq!(store.get("best_streaks_v1").unwrap().unwrap(), "{\"a\":2}");
    }

    #[test]
    fn test_temp_file_cleaned_up() {
        let (store, _dir) = create_test_store();

        store.set("habits_list_v1", "[]").unwrap();

        assert!(!store.temp_path("habits_list_v1").exists());
    }

    #[test]
    fn test_value_stored_verbatim() {
        let (store, dir) = create_test_store();

        store.set("achievements_v1", "[\"PerfectDay\"]").unwrap();

        let content = fs::read_to_string(dir.path().join("achievements_v1.json")).unwrap();
        assert_eq!(content, "[\"PerfectDay\"]");
    }

    #[test]
    fn test_remove_nonexistent() {
        let (store, _dir) = create_test_store();

        // Should not error
        store.remove("nonexistent").unwrap();
    }
}
