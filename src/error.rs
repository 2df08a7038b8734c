// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

/// Transport-level failure of an outbound call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    #[error("invalid endpoint path `{path}`: {reason}")]
    Endpoint { path: String, reason: String },

    #[error("request failed: {0}")]
    Request(String),
}

impl ApiError {
    pub fn endpoint(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Endpoint {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
