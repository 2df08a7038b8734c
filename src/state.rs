// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::CredentialExchange;
use crate::client::ApiClient;
use crate::config::GateConfig;
use crate::error::ApiError;
use crate::router::Router;
use crate::storage::{
    FileSessionRepository, ProfileStorage, SharedSessionRepository, StorageError,
};

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("profile storage unavailable: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Client(#[from] ApiError),
}

/// Every session consumer wired to one shared repository.
#[derive(Clone)]
pub struct SessionGate {
    pub sessions: SharedSessionRepository,
    pub api: ApiClient,
    pub auth: CredentialExchange,
    pub router: Router,
}

impl SessionGate {
    /// Wire the components around `sessions`.
    pub fn new(config: &GateConfig, sessions: SharedSessionRepository) -> Result<Self, ApiError> {
        let api = ApiClient::new(config, sessions.clone())?;
        let auth = CredentialExchange::new(api.clone(), sessions.clone());
        let router = Router::with_default_policy(sessions.clone());

        Ok(Self {
            sessions,
            api,
            auth,
            router,
        })
    }

    /// Open the profile directory named in `config` and wire against it.
    pub fn open(config: &GateConfig) -> Result<Self, StartupError> {
        let storage = ProfileStorage::open(&config.profile_dir)?;
        let sessions: SharedSessionRepository = Arc::new(FileSessionRepository::new(storage));
        Ok(Self::new(config, sessions)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::RoleTag;
    use crate::models::SessionRecord;
    use crate::router::{RouteMatch, View};
    use crate::storage::SessionRepository;
    use tempfile::TempDir;

    #[test]
    fn components_share_one_profile() {
        let dir = TempDir::new().unwrap();
        let config = GateConfig::default().with_profile_dir(dir.path().join("profile"));
        let gate = SessionGate::open(&config).unwrap();

        gate.sessions
            .save(&SessionRecord {
                id: 0,
                identity: "ana".to_string(),
                email: String::new(),
                role: RoleTag::admin(),
                token: "tok".to_string(),
            })
            .unwrap();

        assert_eq!(gate.auth.current_user().unwrap().identity, "ana");
        assert_eq!(
            gate.router.navigate("/admin").unwrap().route,
            RouteMatch::View(View::Admin)
        );

        // A second gate over the same directory sees the same session.
        let reopened = SessionGate::open(&config).unwrap();
        assert_eq!(reopened.auth.current_user().unwrap().identity, "ana");

        gate.auth.logout();
        assert_eq!(
            reopened.router.navigate("/admin").unwrap().route,
            RouteMatch::View(View::Login)
        );
    }
}
