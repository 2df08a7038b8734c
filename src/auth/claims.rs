// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local claim extraction from session tokens.
//!
//! The token is decoded without verifying its signature: the issuing
//! endpoint is the authority, this layer only reads what it was handed.
//! Everything here is a pure function of the token string so it can be
//! exercised against malformed input without touching storage or network.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::Deserialize;
use serde_json::Value;

use super::roles::RoleTag;

/// Short role claim key.
pub const ROLE_CLAIM: &str = "role";

/// Namespaced role claim key issued by older identity backends.
pub const LEGACY_ROLE_CLAIM: &str = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";

/// Base64url with or without trailing `=` padding.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Errors produced while reading claims out of a token.
#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token has no subject claim")]
    MissingSubject,

    #[error("role claim `{claim}` is not a string")]
    InvalidRole { claim: &'static str },
}

/// Raw payload shape. Every field is optional so that missing claims are
/// reported by [`decode_claims`] rather than as an opaque serde error.
#[derive(Debug, Deserialize)]
struct JwtPayload {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    role: Option<Value>,
    #[serde(default, rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    legacy_role: Option<Value>,
}

/// Claims this layer cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject claim, used as the session identity.
    pub subject: String,
    /// Role claim, or `user` when the token carries none.
    pub role: RoleTag,
}

/// Decode the payload of `token` and pull out subject and role.
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let payload = decode_payload(token)?;

    let subject = payload
        .sub
        .filter(|s| !s.is_empty())
        .ok_or(ClaimsError::MissingSubject)?;

    let role = resolve_role(payload.role, payload.legacy_role)?;

    Ok(TokenClaims { subject, role })
}

/// Extract only the role claim from `token`.
pub fn extract_role(token: &str) -> Result<RoleTag, ClaimsError> {
    let payload = decode_payload(token)?;
    resolve_role(payload.role, payload.legacy_role)
}

/// Decode the middle segment. The header and signature segments must be
/// present but are never parsed, so any `alg` (or none at all) is accepted.
fn decode_payload(token: &str) -> Result<JwtPayload, ClaimsError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [_header, payload, _signature] = segments.as_slice() else {
        return Err(ClaimsError::Malformed(format!(
            "expected 3 segments, found {}",
            segments.len()
        )));
    };

    let bytes = SEGMENT_ENGINE
        .decode(payload)
        .map_err(|e| ClaimsError::Malformed(format!("payload is not base64url: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ClaimsError::Malformed(format!("payload is not a JSON object: {e}")))
}

/// Short key first, then the legacy key, then the default.
///
/// A JSON `null` counts as absent. A present value must be a string; an
/// empty string is kept as-is.
fn resolve_role(short: Option<Value>, legacy: Option<Value>) -> Result<RoleTag, ClaimsError> {
    let candidates = [(ROLE_CLAIM, short), (LEGACY_ROLE_CLAIM, legacy)];

    for (claim, value) in candidates {
        match value {
            None | Some(Value::Null) => continue,
            Some(Value::String(role)) => return Ok(RoleTag::new(role)),
            Some(_) => return Err(ClaimsError::InvalidRole { claim }),
        }
    }

    Ok(RoleTag::default())
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

    /// Build an unsigned three-segment token around `payload`.
    pub fn token_with_payload(payload: &str) -> String {
        let header = r#"{"alg":"HS256","typ":"JWT"}"#;
        format!(
            "{}.{}.fake_signature",
            URL_SAFE_NO_PAD.encode(header.as_bytes()),
            URL_SAFE_NO_PAD.encode(payload.as_bytes())
        )
    }
}
