// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// In-memory filesystem for tests and dry runs.
///
/// Clones share the same storage, so a test can keep one handle and inspect
/// what the code under test wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.as_ref().to_path_buf(), content.into());
    }

    /// Contents of a file as UTF-8, if present.
    pub fn file_contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let files = self.files.lock().unwrap();
        files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All directories created so far, sorted.
    pub fn created_dirs(&self) -> Vec<PathBuf> {
        let dirs = self.dirs.lock().unwrap();
        let mut out: Vec<PathBuf> = dirs.iter().cloned().collect();
        out.sort();
        out
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.file_contents(path)
            .ok_or_else(|| anyhow!("file not found: {:?}", path))
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.add_file(path, contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path) || self.dirs.lock().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dir_all_is_idempotent() {
        let fs = MockFileSystem::new();
        fs.create_dir_all(Path::new("S1/logs")).unwrap();
        fs.create_dir_all(Path::new("S1/logs")).unwrap();
        assert_eq!(
            fs.created_dirs(),
            vec![PathBuf::from("S1"), PathBuf::from("S1/logs")]
        );
    }

    #[test]
    fn clones_share_storage() {
        let fs = MockFileSystem::new();
        let other = fs.clone();
        other.write(Path::new("run_info"), b"X=1\n").unwrap();
        assert_eq!(fs.file_contents("run_info").as_deref(), Some("X=1\n"));
        assert!(fs.exists(Path::new("run_info")));
        assert!(fs.read_to_string(Path::new("missing")).is_err());
    }
}
