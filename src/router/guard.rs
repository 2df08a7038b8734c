// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route authorization guard.
//!
//! Evaluated before every navigation, against a fresh snapshot of the
//! session store. Rules, first match wins:
//!
//! 1. No session and the destination is not anonymous → login path.
//! 2. Session with a non-empty role, destination has a role rule and the
//!    normalized role differs from the rule's role → the rule's fallback.
//! 3. Otherwise the navigation proceeds unchanged.
//!
//! The policy is a table rather than branches, so a new role-scoped view
//! is one more [`RoleRule`]. The default table encodes the two-role
//! layout: `/admin` for `admin`, `/user` for `user`, each falling back to
//! the other.
//!
//! Rule 2 compares for inequality only. A role that matches neither rule
//! (say `auditor`) is sent from `/admin` to `/user` and from `/user` back to
//! `/admin`; the router reports that bounce as a redirect loop.

use tracing::debug;

use crate::auth::roles::{ADMIN, USER};
use crate::models::SessionRecord;
use crate::storage::SharedSessionRepository;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const ADMIN_PATH: &str = "/admin";
pub const USER_PATH: &str = "/user";

/// Outcome of guarding one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Proceed to the requested path.
    Allow,
    /// Abort and navigate to this path instead.
    Redirect(String),
}

/// A path reserved for one role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRule {
    pub path: String,
    /// Stored lowercased.
    pub role: String,
    /// Where sessions with any other role are sent.
    pub fallback: String,
}

/// Declarative access policy: anonymous allow-list plus role table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessPolicy {
    login_path: String,
    anonymous: Vec<String>,
    role_rules: Vec<RoleRule>,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(LOGIN_PATH)
            .allow_anonymous(LOGIN_PATH)
            .allow_anonymous(REGISTER_PATH)
            .require_role(ADMIN_PATH, ADMIN, USER_PATH)
            .require_role(USER_PATH, USER, ADMIN_PATH)
    }
}

impl AccessPolicy {
    /// Empty policy redirecting anonymous visitors to `login_path`.
    ///
    /// The login path itself is not implicitly anonymous; add it with
    /// [`AccessPolicy::allow_anonymous`].
    pub fn new(login_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            anonymous: Vec::new(),
            role_rules: Vec::new(),
        }
    }

    /// Let visitors without a session reach `path`.
    pub fn allow_anonymous(mut self, path: impl Into<String>) -> Self {
        self.anonymous.push(path.into());
        self
    }

    /// Reserve `path` for `role`, sending other roles to `fallback`.
    pub fn require_role(
        mut self,
        path: impl Into<String>,
        role: &str,
        fallback: impl Into<String>,
    ) -> Self {
        self.role_rules.push(RoleRule {
            path: path.into(),
            role: role.to_lowercase(),
            fallback: fallback.into(),
        });
        self
    }

    pub fn is_anonymous(&self, path: &str) -> bool {
        self.anonymous.iter().any(|p| p == path)
    }

    /// Decide one navigation attempt. Pure: same inputs, same answer.
    pub fn evaluate(&self, destination: &str, session: Option<&SessionRecord>) -> GuardDecision {
        let Some(session) = session else {
            if self.is_anonymous(destination) {
                return GuardDecision::Allow;
            }
            return GuardDecision::Redirect(self.login_path.clone());
        };

        if session.role.is_empty() {
            return GuardDecision::Allow;
        }

        let role = session.role.normalized();
        self.role_rules
            .iter()
            .find(|rule| rule.path == destination)
            .filter(|rule| rule.role != role)
            .map(|rule| GuardDecision::Redirect(rule.fallback.clone()))
            .unwrap_or(GuardDecision::Allow)
    }
}

/// Guard bound to a session repository.
///
/// Holds no decision state: each call reads the store anew.
#[derive(Clone)]
pub struct RouteGuard {
    policy: AccessPolicy,
    sessions: SharedSessionRepository,
}

impl RouteGuard {
    pub fn new(policy: AccessPolicy, sessions: SharedSessionRepository) -> Self {
        Self { policy, sessions }
    }

    /// Guard a navigation to `destination` using the current session.
    pub fn check(&self, destination: &str) -> GuardDecision {
        let session = self.sessions.snapshot();
        let decision = self.policy.evaluate(destination, session.as_ref());

        debug!(
            destination = %destination,
            signed_in = session.is_some(),
            decision = ?decision,
            "Route guard evaluated"
        );

        decision
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::RoleTag;
    use crate::storage::{InMemorySessionRepository, SessionRepository};

    fn session(role: &str) -> SessionRecord {
        SessionRecord {
            id: 0,
            identity: "ana".to_string(),
            email: String::new(),
            role: RoleTag::new(role),
            token: "tok".to_string(),
        }
    }

    fn redirect(path: &str) -> GuardDecision {
        GuardDecision::Redirect(path.to_string())
    }

    #[test]
    fn anonymous_visitor_is_sent_to_login() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.evaluate(ADMIN_PATH, None), redirect(LOGIN_PATH));
        assert_eq!(policy.evaluate(USER_PATH, None), redirect(LOGIN_PATH));
        assert_eq!(policy.evaluate(ROOT_PATH, None), redirect(LOGIN_PATH));
        assert_eq!(policy.evaluate("/elsewhere", None), redirect(LOGIN_PATH));
    }

    #[test]
    fn anonymous_paths_are_open() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.evaluate(LOGIN_PATH, None), GuardDecision::Allow);
        assert_eq!(policy.evaluate(REGISTER_PATH, None), GuardDecision::Allow);
    }

    #[test]
    fn user_is_kept_out_of_admin() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(ADMIN_PATH, Some(&session("user"))),
            redirect(USER_PATH)
        );
        assert_eq!(
            policy.evaluate(USER_PATH, Some(&session("user"))),
            GuardDecision::Allow
        );
    }

    #[test]
    fn admin_is_kept_out_of_user() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(USER_PATH, Some(&session("admin"))),
            redirect(ADMIN_PATH)
        );
        assert_eq!(
            policy.evaluate(ADMIN_PATH, Some(&session("admin"))),
            GuardDecision::Allow
        );
    }

    #[test]
    fn role_comparison_ignores_case() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(ADMIN_PATH, Some(&session("ADMIN"))),
            GuardDecision::Allow
        );
        assert_eq!(
            policy.evaluate(USER_PATH, Some(&session("User"))),
            GuardDecision::Allow
        );
    }

    #[test]
    fn signed_in_users_may_revisit_login_and_register() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(LOGIN_PATH, Some(&session("admin"))),
            GuardDecision::Allow
        );
        assert_eq!(
            policy.evaluate(REGISTER_PATH, Some(&session("user"))),
            GuardDecision::Allow
        );
    }

    #[test]
    fn empty_role_skips_role_rules() {
        let policy = AccessPolicy::default();
        assert_eq!(policy.evaluate(ADMIN_PATH, Some(&session(""))), GuardDecision::Allow);
        assert_eq!(policy.evaluate(USER_PATH, Some(&session(""))), GuardDecision::Allow);
    }

    #[test]
    fn padded_role_is_compared_verbatim() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(ADMIN_PATH, Some(&session(" admin"))),
            redirect(USER_PATH)
        );
        assert_eq!(
            policy.evaluate(ADMIN_PATH, Some(&session("   "))),
            redirect(USER_PATH)
        );
    }

    #[test]
    fn unknown_role_is_redirected_by_inequality() {
        let policy = AccessPolicy::default();
        assert_eq!(
            policy.evaluate(ADMIN_PATH, Some(&session("auditor"))),
            redirect(USER_PATH)
        );
        assert_eq!(
            policy.evaluate(USER_PATH, Some(&session("auditor"))),
            redirect(ADMIN_PATH)
        );
    }

    #[test]
    fn third_role_is_one_more_table_entry() {
        let policy = AccessPolicy::default().require_role("/audit", "Auditor", USER_PATH);
        assert_eq!(
            policy.evaluate("/audit", Some(&session("auditor"))),
            GuardDecision::Allow
        );
        assert_eq!(
            policy.evaluate("/audit", Some(&session("admin"))),
            redirect(USER_PATH)
        );
    }

    #[test]
    fn guard_reads_store_on_every_check() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let guard = RouteGuard::new(AccessPolicy::default(), repo.clone());

        assert_eq!(guard.check(ADMIN_PATH), redirect(LOGIN_PATH));

        repo.save(&session("admin")).unwrap();
        assert_eq!(guard.check(ADMIN_PATH), GuardDecision::Allow);

        repo.clear().unwrap();
        assert_eq!(guard.check(ADMIN_PATH), redirect(LOGIN_PATH));
    }

    #[test]
    fn guard_treats_corrupted_store_as_signed_out() {
        let repo = Arc::new(InMemorySessionRepository::with_raw("{{{"));
        let guard = RouteGuard::new(AccessPolicy::default(), repo);
        assert_eq!(guard.check(ADMIN_PATH), redirect(LOGIN_PATH));
        assert_eq!(guard.check(REGISTER_PATH), GuardDecision::Allow);
    }
}
