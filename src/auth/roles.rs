// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Role tags carried by a session.

use serde::{Deserialize, Serialize};

/// Role name for administrators.
pub const ADMIN: &str = "admin";

/// Role name for regular users. Also the default when a token carries no role.
pub const USER: &str = "user";

/// Role tag attached to a session.
///
/// The set of role names is open: the remote endpoint may issue anything,
/// so this is a thin wrapper over the raw claim value rather than an enum.
/// The original spelling is kept for persistence; all comparisons go through
/// [`RoleTag::normalized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleTag(String);

impl RoleTag {
    /// Wrap a raw claim value.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Tag for administrators.
    pub fn admin() -> Self {
        Self::new(ADMIN)
    }

    /// Tag for regular users.
    pub fn user() -> Self {
        Self::new(USER)
    }

    /// The tag exactly as issued.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for every comparison. Surrounding whitespace
    /// is significant: `" admin"` is not `admin`.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }

    /// Whether the tag carries no role at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for RoleTag {
    /// Default role is `user` (least privilege for authenticated users).
    fn default() -> Self {
        Self::user()
    }
}

impl std::fmt::Display for RoleTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoleTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
