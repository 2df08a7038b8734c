// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Repository layer providing typed access to profile storage.

pub mod session;

pub use session::{
    FileSessionRepository, InMemorySessionRepository, SessionRepository, SharedSessionRepository,
};
