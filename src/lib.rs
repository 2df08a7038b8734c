// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session Gate - Client Session & Route Authorization
//!
//! Authenticates against a remote credential endpoint, persists the signed
//! session token, attaches it to outbound calls and decides every
//! navigation between role-scoped views.
//!
//! ## Modules
//!
//! - `auth` - Credential exchange and token claim extraction
//! - `client` - Outbound HTTP with bearer decoration
//! - `router` - Route table and authorization guard
//! - `storage` - Profile-scoped session persistence

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod router;
pub mod state;
pub mod storage;
pub mod telemetry;

pub use models::SessionRecord;
pub use state::SessionGate;
