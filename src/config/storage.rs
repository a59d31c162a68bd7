use crate::core::registry::{FleetRegistry, LoadSummary};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Filesystem storage rooted at `base_path`. An empty base means paths are
/// used as given.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Storage for LocalStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.resolve(path))?;
        Ok(data)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);
        let parent = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };
        fs::create_dir_all(&parent)?;

        // Stage next to the target so the final rename stays on one filesystem.
        let mut staged = NamedTempFile::new_in(&parent)?;
        staged.write_all(data)?;
        staged.as_file().sync_all()?;
        staged.persist(&full_path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Path-based persistence for callers that just want a file on disk.
impl FleetRegistry {
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        self.save(&LocalStorage::default(), &path.as_ref().to_string_lossy())
    }

    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadSummary> {
        self.load(&LocalStorage::default(), &path.as_ref().to_string_lossy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.write_file("nested/fleet.csv", b"Car,C-001").unwrap();
        assert_eq!(storage.read_file("nested/fleet.csv").unwrap(), b"Car,C-001");
    }

    #[test]
    fn test_write_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        storage.write_file("fleet.csv", b"first version").unwrap();
        storage.write_file("fleet.csv", b"second").unwrap();
        assert_eq!(storage.read_file("fleet.csv").unwrap(), b"second");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_read_missing_is_io_error() {
        let dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(dir.path());
        assert!(matches!(
            storage.read_file("absent.csv"),
            Err(crate::utils::error::FleetError::Io(_))
        ));
    }

    #[test]
    fn test_registry_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("my_fleet.csv");
        let mut fleet = FleetRegistry::new();
        fleet
            .add(crate::domain::kinds::Car::new("C-001", "Camry", 180.0).unwrap())
            .unwrap();
        assert_eq!(fleet.save_to_file(&path).unwrap(), 1);

        let mut restored = FleetRegistry::new();
        assert_eq!(restored.load_from_file(&path).unwrap().loaded, 1);
        assert_eq!(restored.ids(), vec!["C-001"]);
    }
}
