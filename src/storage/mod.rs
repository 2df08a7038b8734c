// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Profile Storage Module
//!
//! Durable key-value persistence scoped to a profile directory, the
//! command-line counterpart of browser-scoped storage.
//!
//! ## Storage Layout
//!
//! ```text
//! <profile>/
//!   session.json    # Current session record (at most one)
//! ```
//!
//! All operations are synchronous; there is no window in which another
//! component can observe a half-written session.

pub mod paths;
pub mod profile_fs;
pub mod repository;

pub use paths::ProfilePaths;
pub use profile_fs::{ProfileStorage, StorageError, StorageResult};
pub use repository::{
    FileSessionRepository, InMemorySessionRepository, SessionRepository, SharedSessionRepository,
};
