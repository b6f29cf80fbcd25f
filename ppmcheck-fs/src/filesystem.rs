//! Filesystem trait and implementations.
//!
//! The harness only ever needs a handful of operations: list the regular
//! files of a directory, read a file fully, move or delete a file and
//! create the output directory. Everything goes through [`Filesystem`] so the phases
//! can be exercised against [`MockFilesystem`].

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Errors from filesystem operations.
#[derive(Debug, Error)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
}

impl FsError {
    /// Attach the path to a `NotFound` error, keep everything else as IO.
    fn at(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            FsError::NotFound(path.to_path_buf())
        } else {
            FsError::Io(err)
        }
    }
}

/// Trait for filesystem operations.
/// Abstracted for testing with mock implementations.
pub trait Filesystem: Send + Sync {
    /// Names of the regular files directly inside `dir`, sorted ascending.
    ///
    /// Names that are not valid UTF-8 are skipped.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, FsError>;

    /// Read the whole file as raw bytes.
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError>;

    /// Move `from` to `to`, replacing `to` if it exists.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError>;

    /// Delete a regular file.
    fn remove_file(&self, path: &Path) -> Result<(), FsError>;

    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is an existing directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Create directory and parents if needed.
    fn create_dir_all(&self, path: &Path) -> Result<(), FsError>;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFilesystem;

impl Filesystem for RealFilesystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        let mut names = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| FsError::at(dir, e))? {
            let entry = entry?;
            // Follows symlinks, a link to a regular file counts as a file.
            if !entry.path().is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        fs::read(path).map_err(|e| FsError::at(path, e))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        fs::rename(from, to).map_err(|e| FsError::at(from, e))
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        fs::remove_file(path).map_err(|e| FsError::at(path, e))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        fs::create_dir_all(path)?;
        Ok(())
    }
}

/// In-memory filesystem for testing.
/// Cloning creates a new handle to the same underlying data.
#[derive(Debug, Clone, Default)]
pub struct MockFilesystem {
    files: Arc<RwLock<BTreeMap<PathBuf, Vec<u8>>>>,
    dirs: Arc<RwLock<HashSet<PathBuf>>>,
}

impl MockFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file directly (for test setup). Parent directories are created.
    pub fn add_file(&self, path: impl Into<PathBuf>, data: impl Into<Vec<u8>>) {
        let path = path.into();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.files.write().unwrap().insert(path, data.into());
    }

    /// Register a directory and all of its ancestors.
    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut dirs = self.dirs.write().unwrap();
        for ancestor in path.as_ref().ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
    }

    /// Get content of a specific file.
    pub fn get_file(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.read().unwrap().get(path).cloned()
    }
}

impl Filesystem for MockFilesystem {
    fn list_files(&self, dir: &Path) -> Result<Vec<String>, FsError> {
        if !self.is_dir(dir) {
            return Err(FsError::NotFound(dir.to_path_buf()));
        }

        let mut names: Vec<String> = self
            .files
            .read()
            .unwrap()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
            .collect();

        names.sort();
        Ok(names)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>, FsError> {
        self.get_file(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), FsError> {
        let mut files = self.files.write().unwrap();
        let data = files
            .remove(from)
            .ok_or_else(|| FsError::NotFound(from.to_path_buf()))?;
        files.insert(to.to_path_buf(), data);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> Result<(), FsError> {
        self.files
            .write()
            .unwrap()
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.read().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.read().unwrap().contains(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<(), FsError> {
        self.add_dir(path);
        Ok(())
    }
}
