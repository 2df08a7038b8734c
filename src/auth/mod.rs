// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Establishes a session against the remote credential endpoint.
//!
//! ## Auth Flow
//!
//! 1. User submits name and password (or registers first)
//! 2. The credential endpoint answers with a signed token
//! 3. This module:
//!    - Decodes the token payload locally (signature is NOT verified)
//!    - Extracts:
//!      - `sub` → session identity
//!      - `role`, or the legacy namespaced role claim → role tag
//!    - Persists the session record
//!
//! ## Trust
//!
//! The decoded claims are untrusted input. They decide which view the
//! client routes to, never what the remote service allows: every outbound
//! call carries the token and the service re-verifies it.
//!
//! No expiry is enforced here. A stored session stays valid until logout.

pub mod claims;
pub mod error;
pub mod exchange;
pub mod roles;

pub use claims::{decode_claims, extract_role, ClaimsError, TokenClaims};
pub use error::AuthError;
pub use exchange::CredentialExchange;
pub use roles::RoleTag;
