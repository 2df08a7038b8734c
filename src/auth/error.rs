// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use super::claims::ClaimsError;
use crate::error::ApiError;
use crate::storage::StorageError;

/// Failure of a login or registration attempt.
///
/// These never reach callers of the credential exchange: they are logged
/// and the attempt reports no session.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Endpoint unreachable, timed out, or the request could not be built
    #[error("Credential endpoint unreachable: {0}")]
    Network(String),

    /// Endpoint answered with a non-2xx status
    #[error("Credential endpoint returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx response without the expected body
    #[error("Credential endpoint response was invalid: {0}")]
    InvalidResponse(String),

    /// Issued token could not be decoded
    #[error("Issued token could not be decoded: {0}")]
    Decode(#[from] ClaimsError),

    /// Session could not be persisted
    #[error("Session could not be stored: {0}")]
    Storage(#[from] StorageError),
}

impl From<ApiError> for AuthError {
    fn from(e: ApiError) -> Self {
        AuthError::Network(e.to_string())
    }
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Network(_) => "network_failure",
            AuthError::Status { .. } => "network_failure",
            AuthError::InvalidResponse(_) => "invalid_response",
            AuthError::Decode(_) => "decode_failure",
            AuthError::Storage(_) => "storage_failure",
        }
    }
}
