// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use serde::{Deserialize, Serialize};

use crate::auth::{RoleTag, TokenClaims};

/// The persisted proof-of-identity bundle for the current profile.
///
/// Field names on disk follow the credential endpoint's vocabulary
/// (`name`, `email`, `token`), not the Rust names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Local numeric identifier; `0` when the endpoint did not supply one.
    pub id: u64,
    /// Display identifier, taken from the token subject.
    #[serde(rename = "name")]
    pub identity: String,
    /// Contact address; empty when the endpoint did not supply one.
    pub email: String,
    /// Role tag as issued in the token.
    pub role: RoleTag,
    /// Opaque bearer credential.
    pub token: String,
}

impl SessionRecord {
    /// Build the record for a freshly issued token.
    ///
    /// The login endpoint only returns the token, so `id` and `email`
    /// are left at their "unknown" placeholders.
    pub fn from_token(token: impl Into<String>, claims: TokenClaims) -> Self {
        Self {
            id: 0,
            identity: claims.subject,
            email: String::new(),
            role: claims.role,
            token: token.into(),
        }
    }

    /// Whether this session can be attached as a bearer credential.
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }
}

/// Body of `POST /auth/login`.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub name: &'a str,
    pub password: &'a str,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
