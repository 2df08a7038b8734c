// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Credential exchange: login, registration and logout.
//!
//! ## Login Flow
//!
//! 1. `POST /auth/login {name, password}` through the shared [`ApiClient`]
//! 2. Read `{token}` from the 2xx response
//! 3. Decode subject and role from the token (no signature check)
//! 4. Persist the session record and return it
//!
//! Registration posts to `/auth/register` and, on success, runs the login
//! flow with the same credentials. It never yields a session of its own.
//!
//! Failures are logged and reported as `None`. The session store is only
//! written after every earlier step succeeded, so a failed attempt leaves
//! the previous state untouched.
//!
//! Each exchange runs on its own tokio task. A caller that stops waiting
//! does not cancel it: the request still completes and a successful
//! result is still persisted.

use std::future::Future;

use tracing::{error, info};

use super::claims::decode_claims;
use super::roles::USER;
use super::AuthError;
use crate::client::ApiClient;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, SessionRecord};
use crate::storage::SharedSessionRepository;

/// Login endpoint path, relative to the API base URL.
pub const LOGIN_PATH: &str = "auth/login";

/// Registration endpoint path, relative to the API base URL.
pub const REGISTER_PATH: &str = "auth/register";

/// Exchanges credentials for a persisted session.
#[derive(Clone)]
pub struct CredentialExchange {
    api: ApiClient,
    sessions: SharedSessionRepository,
}

impl CredentialExchange {
    pub fn new(api: ApiClient, sessions: SharedSessionRepository) -> Self {
        Self { api, sessions }
    }

    /// Log in and persist the resulting session.
    ///
    /// Returns `None` on any failure; the cause is logged.
    pub async fn login(&self, identity: &str, secret: &str) -> Option<SessionRecord> {
        let exchange = self.clone();
        let identity = identity.to_owned();
        let secret = secret.to_owned();
        detached(async move { exchange.run_login(&identity, &secret).await }).await
    }

    /// Register a new account with role `user`, then log in with it.
    ///
    /// Returns `None` without attempting login when registration fails.
    pub async fn register(
        &self,
        identity: &str,
        contact_address: &str,
        secret: &str,
    ) -> Option<SessionRecord> {
        let exchange = self.clone();
        let identity = identity.to_owned();
        let contact_address = contact_address.to_owned();
        let secret = secret.to_owned();
        detached(async move {
            exchange
                .run_register(&identity, &contact_address, &secret)
                .await
        })
        .await
    }

    /// Drop the current session. Safe to call when signed out.
    pub fn logout(&self) {
        match self.sessions.clear() {
            Ok(()) => info!("Session cleared"),
            Err(e) => error!(error = %e, "Failed to clear session"),
        }
    }

    /// The stored session, if any.
    pub fn current_user(&self) -> Option<SessionRecord> {
        self.sessions.snapshot()
    }

    async fn run_login(&self, identity: &str, secret: &str) -> Option<SessionRecord> {
        match self.try_login(identity, secret).await {
            Ok(session) => {
                info!(
                    identity = %session.identity,
                    role = %session.role,
                    "Session established"
                );
                Some(session)
            }
            Err(e) => {
                error!(
                    identity = %identity,
                    error_code = e.error_code(),
                    error = %e,
                    "Login failed"
                );
                None
            }
        }
    }

    async fn run_register(
        &self,
        identity: &str,
        contact_address: &str,
        secret: &str,
    ) -> Option<SessionRecord> {
        if let Err(e) = self.try_register(identity, contact_address, secret).await {
            error!(
                identity = %identity,
                error_code = e.error_code(),
                error = %e,
                "Registration failed"
            );
            return None;
        }

        info!(identity = %identity, "Registered, logging in");
        self.run_login(identity, secret).await
    }

    async fn try_login(&self, identity: &str, secret: &str) -> Result<SessionRecord, AuthError> {
        let body = LoginRequest {
            name: identity,
            password: secret,
        };
        let response = self.api.post_json(LOGIN_PATH, &body).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let LoginResponse { token } = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        if token.trim().is_empty() {
            return Err(AuthError::InvalidResponse(
                "login response did not include a token".to_string(),
            ));
        }

        let claims = decode_claims(&token)?;
        let session = SessionRecord::from_token(token, claims);

        self.sessions.save(&session)?;
        Ok(session)
    }

    async fn try_register(
        &self,
        identity: &str,
        contact_address: &str,
        secret: &str,
    ) -> Result<(), AuthError> {
        let body = RegisterRequest {
            name: identity,
            email: contact_address,
            password: secret,
            role: USER,
        };
        let response = self.api.post_json(REGISTER_PATH, &body).await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

/// Run `flow` on its own task and wait for it.
///
/// Dropping the returned future detaches the task instead of cancelling it.
async fn detached<F>(flow: F) -> Option<SessionRecord>
where
    F: Future<Output = Option<SessionRecord>> + Send + 'static,
{
    match tokio::spawn(flow).await {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "Credential exchange task failed");
            None
        }
    }
}
