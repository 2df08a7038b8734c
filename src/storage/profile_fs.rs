// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key-value JSON storage on a profile directory.
//!
//! Every key maps to one JSON file. Writes go to a temp file first and are
//! renamed into place, so a reader sees either the previous value or the new
//! one, never a torn write.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use super::ProfilePaths;

/// Error type for profile storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Entry does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Stored value exists but is not valid serialized data
    #[error("Corrupted entry at {path}: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be serialized for writing
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Storage not initialized
    #[error("Storage not initialized")]
    NotInitialized,
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// JSON file storage rooted at a profile directory.
#[derive(Debug, Clone)]
pub struct ProfileStorage {
    paths: ProfilePaths,
    initialized: bool,
}

impl ProfileStorage {
    /// Create a new ProfileStorage instance.
    ///
    /// Does NOT create the directory. Call `initialize()` first.
    pub fn new(paths: ProfilePaths) -> Self {
        Self {
            paths,
            initialized: false,
        }
    }

    /// Create and initialize storage rooted at `root`.
    pub fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let mut storage = Self::new(ProfilePaths::new(root));
        storage.initialize()?;
        Ok(storage)
    }

    /// Get the storage paths.
    pub fn paths(&self) -> &ProfilePaths {
        &self.paths
    }

    /// Create the profile directory. Safe to call multiple times.
    pub fn initialize(&mut self) -> StorageResult<()> {
        fs::create_dir_all(self.paths.root())?;
        self.initialized = true;
        Ok(())
    }

    /// Read a JSON file and deserialize it.
    ///
    /// A missing file is `NotFound`; a file that does not parse is
    /// `Corrupted`.
    pub fn read_json<T: DeserializeOwned>(&self, path: impl AsRef<Path>) -> StorageResult<T> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(path.display().to_string()),
            _ => StorageError::Io(e),
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|source| StorageError::Corrupted {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write a JSON file (atomic write via rename).
    pub fn write_json<T: Serialize>(&self, path: impl AsRef<Path>, value: &T) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }

        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp_path = path.with_extension("tmp");
        {
            let file = File::create(&temp_path)?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
        }

        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Write raw bytes to a file.
    pub fn write_raw(&self, path: impl AsRef<Path>, data: &[u8]) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        fs::write(path.as_ref(), data)?;
        Ok(())
    }

    /// Check if a file exists.
    pub fn exists(&self, path: impl AsRef<Path>) -> bool {
        File::open(path.as_ref()).is_ok()
    }

    /// Delete a file. Deleting a missing file is not an error.
    pub fn remove(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        if !self.initialized {
            return Err(StorageError::NotInitialized);
        }
        match fs::remove_file(path.as_ref()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
