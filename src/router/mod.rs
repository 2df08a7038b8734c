// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Route table and navigation driver.
//!
//! ## Routes
//!
//! | Path | Target |
//! |------|--------|
//! | `/` | redirect to `/login` |
//! | `/login` | login view |
//! | `/register` | registration view |
//! | `/admin` | admin view |
//! | `/user` | user view |
//!
//! A navigation resolves the destination, applies route-level redirects,
//! then asks the [`RouteGuard`]. Guard redirects start a new navigation, so
//! the guard runs again on the redirect target. The chain stops at the
//! first allowed path, or fails once it exceeds [`MAX_REDIRECTS`].

pub mod guard;

use url::Url;

pub use guard::{
    AccessPolicy, GuardDecision, RoleRule, RouteGuard, ADMIN_PATH, LOGIN_PATH, REGISTER_PATH,
    ROOT_PATH, USER_PATH,
};

use crate::storage::SharedSessionRepository;

/// Redirects followed before a navigation is abandoned.
pub const MAX_REDIRECTS: usize = 8;

/// Origin used to resolve relative destinations.
const APP_ORIGIN: &str = "http://app.local/";

/// Role-scoped views this layer routes to. Rendering is out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Login,
    Register,
    Admin,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum RouteTarget {
    View(View),
    Redirect(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RouteRecord {
    path: &'static str,
    target: RouteTarget,
}

const ROUTES: &[RouteRecord] = &[
    RouteRecord {
        path: ROOT_PATH,
        target: RouteTarget::Redirect(LOGIN_PATH),
    },
    RouteRecord {
        path: LOGIN_PATH,
        target: RouteTarget::View(View::Login),
    },
    RouteRecord {
        path: REGISTER_PATH,
        target: RouteTarget::View(View::Register),
    },
    RouteRecord {
        path: ADMIN_PATH,
        target: RouteTarget::View(View::Admin),
    },
    RouteRecord {
        path: USER_PATH,
        target: RouteTarget::View(View::User),
    },
];

/// What a settled navigation landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteMatch {
    View(View),
    /// Allowed by the guard but not in the route table.
    NotFound,
}

/// A completed navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Destination as requested.
    pub requested: String,
    /// Path the navigation settled on.
    pub path: String,
    pub route: RouteMatch,
    /// Every redirect target, in order.
    pub redirects: Vec<String>,
}

impl Navigation {
    pub fn was_redirected(&self) -> bool {
        !self.redirects.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("`{destination}` is not a path in this application")]
    InvalidDestination { destination: String },

    #[error(
        "navigation to `{requested}` exceeded {max} redirects: {}",
        .chain.join(" -> "),
        max = MAX_REDIRECTS
    )]
    RedirectLoop {
        requested: String,
        chain: Vec<String>,
    },
}

/// Navigation driver over the fixed route table.
#[derive(Clone)]
pub struct Router {
    guard: RouteGuard,
}

impl Router {
    pub fn new(guard: RouteGuard) -> Self {
        Self { guard }
    }

    /// Router with the default two-role policy.
    pub fn with_default_policy(sessions: SharedSessionRepository) -> Self {
        Self::new(RouteGuard::new(AccessPolicy::default(), sessions))
    }

    /// Navigate to `destination`, following redirects until it settles.
    pub fn navigate(&self, destination: &str) -> Result<Navigation, NavigationError> {
        let mut path = normalize_path(destination)?;
        let mut redirects = Vec::new();

        loop {
            let next = match record_for(&path).map(|r| &r.target) {
                Some(RouteTarget::Redirect(target)) => target.to_string(),
                _ => match self.guard.check(&path) {
                    GuardDecision::Allow => {
                        return Ok(Navigation {
                            requested: destination.to_string(),
                            route: resolve(&path),
                            path,
                            redirects,
                        });
                    }
                    GuardDecision::Redirect(target) => target,
                },
            };

            redirects.push(next.clone());
            if redirects.len() > MAX_REDIRECTS {
                return Err(NavigationError::RedirectLoop {
                    requested: destination.to_string(),
                    chain: redirects,
                });
            }
            path = next;
        }
    }
}

fn record_for(path: &str) -> Option<&'static RouteRecord> {
    ROUTES.iter().find(|r| r.path == path)
}

fn resolve(path: &str) -> RouteMatch {
    match record_for(path).map(|r| &r.target) {
        Some(RouteTarget::View(view)) => RouteMatch::View(*view),
        _ => RouteMatch::NotFound,
    }
}

/// Reduce a destination to its path: query and fragment are dropped, dot
/// segments resolved. Destinations on another origin are rejected.
fn normalize_path(destination: &str) -> Result<String, NavigationError> {
    let invalid = || NavigationError::InvalidDestination {
        destination: destination.to_string(),
    };

    let origin = Url::parse(APP_ORIGIN).map_err(|_| invalid())?;
    let url = origin.join(destination.trim()).map_err(|_| invalid())?;

    if url.origin() != origin.origin() {
        return Err(invalid());
    }

    Ok(url.path().to_string())
}
