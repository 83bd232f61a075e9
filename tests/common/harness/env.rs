//! Isolated test environment with temp directory.

use super::{JotterCommand, TestNote};
use anyhow::Result;
use jotter::domain::NoteId;
use jotter::store::{JsonFileStorage, NoteStore};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary store file.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// The store file and the config directory both live inside it.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Root of the environment
    root: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();
        Self {
            _temp_dir: temp_dir,
            root,
        }
    }

    /// Returns the root directory of the environment.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the path of the JSON store file.
    pub fn store_path(&self) -> PathBuf {
        self.root.join("notes.json")
    }

    /// Adds notes to the store, in order, and returns their ids.
    pub fn add_notes(&self, notes: &[TestNote]) -> Result<Vec<NoteId>> {
        let mut store = NoteStore::init(JsonFileStorage::new(self.store_path()))?;
        let ids = store.merge_all(notes.iter().map(TestNote::to_draft).collect());
        store.persist()?;
        Ok(ids)
    }

    /// Adds one note and returns its id.
    pub fn add_note(&self, note: &TestNote) -> NoteId {
        self.add_notes(std::slice::from_ref(note))
            .expect("Failed to add test note")[0]
    }

    /// Reads the persisted store snapshot as raw JSON.
    pub fn snapshot(&self) -> serde_json::Value {
        let contents =
            std::fs::read_to_string(self.store_path()).expect("Failed to read store file");
        serde_json::from_str(&contents).expect("Store file is not JSON")
    }

    /// Creates a JotterCommand configured for this test environment.
    pub fn cmd(&self) -> JotterCommand {
        JotterCommand::new()
            .config_home(&self.root.join("config"))
            .store(&self.store_path())
    }

    /// Writes a file to the test environment and returns its path.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // TestEnv Foundation
    // ===========================================

    #[test]
    fn test_env_creates_temp_directory() {
        let env = TestEnv::new();
        assert!(env.root().is_dir(), "root should be a directory");
    }

    #[test]
    fn test_env_cleanup_on_drop() {
        let path = {
            let env = TestEnv::new();
            env.root().to_path_buf()
        };
        assert!(!path.exists(), "temp directory should be cleaned up on drop");
    }

    #[test]
    fn test_env_provides_command() {
        let env = TestEnv::new();
        let cmd = env.cmd();
        let args = cmd.get_args();
        assert_eq!(args[0], "--store");
        assert_eq!(args[1], env.store_path().to_string_lossy());
    }

    // ===========================================
    // Note Seeding
    // ===========================================

    #[test]
    fn test_env_add_notes_persists_in_order() {
        let env = TestEnv::new();
        let ids = env
            .add_notes(&[TestNote::new("First"), TestNote::new("Second")])
            .unwrap();

        let snapshot = env.snapshot();
        assert_eq!(snapshot["notes"][0]["title"], "First");
        assert_eq!(snapshot["notes"][1]["title"], "Second");
        assert_eq!(snapshot["notes"][0]["id"], ids[0].get());
    }

    #[test]
    fn test_env_add_note_twice_gets_distinct_ids() {
        let env = TestEnv::new();
        let a = env.add_note(&TestNote::new("A"));
        let b = env.add_note(&TestNote::new("B"));
        assert_ne!(a, b);
    }
}
