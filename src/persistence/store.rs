//! Byte-blob storage backends.

use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::StoreError;

/// Where a saved game lives.
///
/// A store holds at most one blob. Codecs decide what the bytes mean.
pub trait StateStore {
    /// Replace the stored blob.
    fn write(&self, bytes: &[u8]) -> Result<(), StoreError>;

    /// The stored blob, or `None` if nothing has been saved.
    fn read(&self) -> Result<Option<Vec<u8>>, StoreError>;

    /// Forget the stored blob. Removing nothing is not an error.
    fn remove(&self) -> Result<(), StoreError>;
}

/// In-process store. Lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: RefCell<Option<Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a blob is currently stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blob.borrow().is_none()
    }
}

impl StateStore for MemoryStore {
    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }

    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.blob.borrow().clone())
    }

    fn remove(&self) -> Result<(), StoreError> {
        self.blob.borrow_mut().take();
        Ok(())
    }
}

/// Single-file store.
///
/// Writes go to a `.tmp` sibling first and are renamed into place, so a
/// crash mid-write leaves the previous save intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store at the given path. The parent directory must exist.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The save file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl StateStore for FileStore {
    fn write(&self, bytes: &[u8]) -> Result<(), StoreError> {
        let temp = self.temp_path();
        fs::write(&temp, bytes)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn read(&self) -> Result<Option<Vec<u8>>, StoreError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
