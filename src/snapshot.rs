//! Snapshot file hand-off between the check and update phases
//!
//! The snapshot is a pretty-printed JSON array of identified dependencies.
//! A check writes it, an update reads it and removes it once every
//! requested id has been processed.

use crate::domain::IdentifiedDependency;
use crate::error::SnapshotError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Default snapshot file name, relative to the working directory
pub const DEFAULT_SNAPSHOT_FILE: &str = "package-updates.json";

/// Reads and writes the snapshot file at a fixed path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store at an explicit file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at [`DEFAULT_SNAPSHOT_FILE`] inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(DEFAULT_SNAPSHOT_FILE))
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a snapshot file is present
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Write the snapshot, replacing any existing file
    pub fn save(&self, dependencies: &[IdentifiedDependency]) -> Result<(), SnapshotError> {
        let json = serde_json::to_string_pretty(dependencies).map_err(|e| {
            SnapshotError::Serialize {
                message: e.to_string(),
            }
        })?;
        fs::write(&self.path, json).map_err(|e| SnapshotError::write(&self.path, e))?;
        tracing::debug!(
            path = %self.path.display(),
            count = dependencies.len(),
            "snapshot saved"
        );
        Ok(())
    }

    /// Read the snapshot written by the last check
    pub fn load(&self) -> Result<Vec<IdentifiedDependency>, SnapshotError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                SnapshotError::missing(&self.path)
            } else {
                SnapshotError::read(&self.path, e)
            }
        })?;
        let dependencies: Vec<IdentifiedDependency> = serde_json::from_str(&content)
            .map_err(|e| SnapshotError::parse(&self.path, e.to_string()))?;
        tracing::debug!(
            path = %self.path.display(),
            count = dependencies.len(),
            "snapshot loaded"
        );
        Ok(dependencies)
    }

    /// Remove the snapshot; a missing file is an error
    pub fn clear(&self) -> Result<(), SnapshotError> {
        fs::remove_file(&self.path).map_err(|e| SnapshotError::remove(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), "snapshot removed");
        Ok(())
    }

    /// Remove a stale snapshot if there is one
    ///
    /// Returns whether a file was removed.
    pub fn clear_if_exists(&self) -> Result<bool, SnapshotError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SnapshotError::remove(&self.path, e)),
        }
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new(DEFAULT_SNAPSHOT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyKind, OutdatedDependency};

    fn sample() -> Vec<IdentifiedDependency> {
        vec![
            IdentifiedDependency::new(
                0,
                OutdatedDependency::new(
                    "jest",
                    "28.0.0",
                    "28.1.3",
                    "29.7.0",
                    "node_modules/jest",
                    DependencyKind::Development,
                ),
            ),
            IdentifiedDependency::new(
                1,
                OutdatedDependency::new(
                    "lodash",
                    "4.0.0",
                    "4.1.0",
                    "5.0.0",
                    "node_modules/lodash",
                    DependencyKind::Production,
                ),
            ),
        ]
    }

    #[test]
    fn test_default_path() {
        assert_eq!(
            SnapshotStore::default().path(),
            Path::new("package-updates.json")
        );
    }

    #[test]
    fn test_save_then_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());

        store.save(&sample()).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), sample());
    }

    #[test]
    fn test_save_is_indented() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        store.save(&sample()[..1]).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert!(content.starts_with("[\n  {\n    \"id\": 0,\n    \"name\": \"jest\""));
        assert!(content.contains("\"type\": \"devDependencies\""));
    }

    #[test]
    fn test_save_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());

        store.save(&sample()).unwrap();
        store.save(&sample()[1..]).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].name, "lodash");
    }

    #[test]
    fn test_load_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        assert!(matches!(store.load(), Err(SnapshotError::Missing { .. })));
    }

    #[test]
    fn test_load_invalid() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        fs::write(store.path(), "{ not json").unwrap();
        assert!(matches!(store.load(), Err(SnapshotError::Parse { .. })));
    }

    #[test]
    fn test_load_hand_written_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        fs::write(
            store.path(),
            r#"[{"id":0,"name":"lodash","current":"4.0.0","wanted":"4.1.0","latest":"5.0.0","location":"node_modules/lodash","type":"dependencies"}]"#,
        )
        .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 0);
        assert_eq!(loaded[0].dependency, sample()[1].dependency);
    }

    #[test]
    fn test_clear() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        store.save(&sample()).unwrap();

        store.clear().unwrap();
        assert!(!store.exists());
    }

    #[test]
    fn test_clear_missing_is_error() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        assert!(matches!(store.clear(), Err(SnapshotError::Remove { .. })));
    }

    #[test]
    fn test_clear_if_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = SnapshotStore::in_dir(temp_dir.path());
        assert!(!store.clear_if_exists().unwrap());

        store.save(&sample()).unwrap();
        assert!(store.clear_if_exists().unwrap());
        assert!(!store.exists());
    }
}
