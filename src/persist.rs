//! Durable persistence for the polygon collection.
//!
//! The store serializes its whole collection into a single blob and hands it
//! to a [`PersistenceProvider`]. Providers only move opaque strings; the JSON
//! encoding itself lives with the store so every backend stays
//! interchangeable.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading or writing the durable blob.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// The underlying storage could not be read or written.
    #[error("storage i/o failed: {0}")]
    Io(#[from] io::Error),
    /// The collection could not be serialized.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A durable key-value blob store for the serialized polygon collection.
///
/// `write_all` must be durable before it returns; the store relies on that
/// for its write-through guarantee.
pub trait PersistenceProvider {
    /// Reads the serialized collection, or `None` if nothing was ever saved.
    fn read_all(&self) -> Result<Option<String>, PersistenceError>;

    /// Replaces the serialized collection with `blob`.
    fn write_all(&mut self, blob: &str) -> Result<(), PersistenceError>;
}

/// File-backed persistence, one JSON document per store.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    path: PathBuf,
}

impl FilePersistence {
    /// Creates a provider backed by the given file path.
    ///
    /// The file is created on first write; a missing file reads as an empty
    /// collection.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PersistenceProvider for FilePersistence {
    fn read_all(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&mut self, blob: &str) -> Result<(), PersistenceError> {
        fs::write(&self.path, blob)?;
        Ok(())
    }
}

/// In-memory persistence for tests and ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    blob: Option<String>,
}

impl MemoryPersistence {
    /// Creates a provider with nothing saved yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider pre-seeded with a serialized collection.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    /// The last written blob, if any.
    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl PersistenceProvider for MemoryPersistence {
    fn read_all(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.blob.clone())
    }

    fn write_all(&mut self, blob: &str) -> Result<(), PersistenceError> {
        self.blob = Some(blob.to_string());
        Ok(())
    }
}
