// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session repository.
//!
//! The session record is the only persisted entity. It lives under one
//! fixed key, so saving always replaces the previous session: there is at
//! most one active identity per profile.
//!
//! Every component that needs the session (credential exchange, request
//! decorator, route guard) receives a [`SessionRepository`] rather than
//! touching storage directly, which keeps the read and write points in one
//! place and lets tests swap in [`InMemorySessionRepository`].

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::models::SessionRecord;
use crate::storage::paths::SESSION_KEY;
use crate::storage::{ProfileStorage, StorageError, StorageResult};

/// Persistence for the current session record.
pub trait SessionRepository: Send + Sync {
    /// Store `record`, replacing any existing session.
    fn save(&self, record: &SessionRecord) -> StorageResult<()>;

    /// The stored session, or `None` when no session exists.
    ///
    /// # Errors
    /// `StorageError::Corrupted` when a value is stored but does not parse.
    fn current(&self) -> StorageResult<Option<SessionRecord>>;

    /// Remove the stored session. Clearing an empty store is not an error.
    fn clear(&self) -> StorageResult<()>;

    /// Read the session for a consumer that must never fail.
    ///
    /// Storage errors, including a corrupted record, are logged and
    /// reported as "no session".
    fn snapshot(&self) -> Option<SessionRecord> {
        match self.current() {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "Session store unreadable, treating as signed out");
                None
            }
        }
    }
}

/// Shared handle passed to every session consumer.
pub type SharedSessionRepository = Arc<dyn SessionRepository>;

/// Session repository backed by a profile directory.
#[derive(Debug, Clone)]
pub struct FileSessionRepository {
    storage: ProfileStorage,
}

impl FileSessionRepository {
    /// Create a new FileSessionRepository.
    pub fn new(storage: ProfileStorage) -> Self {
        Self { storage }
    }

    /// Get the underlying storage.
    pub fn storage(&self) -> &ProfileStorage {
        &self.storage
    }
}

impl SessionRepository for FileSessionRepository {
    fn save(&self, record: &SessionRecord) -> StorageResult<()> {
        self.storage.write_json(self.storage.paths().session(), record)
    }

    fn current(&self) -> StorageResult<Option<SessionRecord>> {
        match self.storage.read_json(self.storage.paths().session()) {
            Ok(record) => Ok(Some(record)),
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn clear(&self) -> StorageResult<()> {
        self.storage.remove(self.storage.paths().session())
    }
}

/// In-memory session repository.
///
/// Holds the record as a serialized blob, exactly as the file repository
/// does, so round-trip and corruption behavior match.
#[derive(Debug, Default)]
pub struct InMemorySessionRepository {
    blob: Mutex<Option<String>>,
}

impl InMemorySessionRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository already holding `raw`, valid or not.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(raw.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A panic mid-write cannot leave a torn value: the slot is replaced whole.
        self.blob.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn save(&self, record: &SessionRecord) -> StorageResult<()> {
        let blob = serde_json::to_string(record)?;
        *self.slot() = Some(blob);
        Ok(())
    }

    fn current(&self) -> StorageResult<Option<SessionRecord>> {
        let slot = self.slot();
        let Some(blob) = slot.as_deref() else {
            return Ok(None);
        };
        serde_json::from_str(blob)
            .map(Some)
            .map_err(|source| StorageError::Corrupted {
                path: SESSION_KEY.into(),
                source,
            })
    }

    fn clear(&self) -> StorageResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
