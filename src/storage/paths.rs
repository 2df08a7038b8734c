// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Path constants and utilities for the profile storage layout.

use std::path::{Path, PathBuf};

/// Default profile directory, relative to the working directory.
pub const DEFAULT_PROFILE_DIR: &str = ".session-gate";

/// The single key the session record lives under.
pub const SESSION_KEY: &str = "session";

/// Storage path utilities for one profile directory.
///
/// A profile plays the role of a browser profile: every key stored under
/// it is visible to every component running against the same directory.
#[derive(Debug, Clone)]
pub struct ProfilePaths {
    root: PathBuf,
}

impl Default for ProfilePaths {
    fn default() -> Self {
        Self::new(DEFAULT_PROFILE_DIR)
    }
}

impl ProfilePaths {
    /// Create a new ProfilePaths with a custom root (useful for testing).
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory of the profile.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the file backing `key`.
    pub fn entry(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }

    /// Path to the session record.
    pub fn session(&self) -> PathBuf {
        self.entry(SESSION_KEY)
    }
}
