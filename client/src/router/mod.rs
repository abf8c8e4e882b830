//! Client-side routes and the navigation guard.
//!
//! SYSTEM CONTEXT
//! ==============
//! `guard` is the pure access policy, `routes` the static route table, and
//! [`Router`] glues them to durable storage. The token is read from storage
//! at evaluation time so route setup never depends on the session store.

pub mod guard;
pub mod routes;


use std::sync::Arc;

pub use guard::{GuardAction, RouteRequirement, guard};
pub use routes::{MatchedRoute, RouteName, match_route};

use crate::state::storage::{Storage, read_token};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";

/// Redirect hops before giving up. The route table needs at most one.
const MAX_REDIRECTS: usize = 4;

/// Where a navigation ended up after the guard ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub path: String,
    /// `None` for paths outside the route table.
    pub route: Option<MatchedRoute>,
    pub redirected: bool,
}

pub struct Router {
    storage: Arc<dyn Storage>,
}

impl Router {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Evaluate the guard for `path` against the durable token.
    pub fn before_each(&self, path: &str) -> GuardAction {
        let requirement = match_route(path).map_or(RouteRequirement::Public, |m| m.name.requirement());
        let has_token = read_token(self.storage.as_ref()).is_some();
        guard(requirement, has_token)
    }

    /// Resolve `path`, following guard redirects.
    pub fn navigate(&self, path: &str) -> Navigation {
        let mut current = path.to_owned();
        let mut redirected = false;
        for _ in 0..MAX_REDIRECTS {
            match self.before_each(&current) {
                GuardAction::Proceed => break,
                GuardAction::Redirect(target) => {
                    tracing::debug!(from = %current, to = target, "guard redirect");
                    current = target.to_owned();
                    redirected = true;
                }
            }
        }
        let route = match_route(&current);
        Navigation { path: current, route, redirected }
    }
}
