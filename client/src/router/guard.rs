//! Per-route access policy.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use super::{HOME_PATH, LOGIN_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRequirement {
    /// Reachable in any session state.
    Public,
    /// Needs a token.
    RequiresAuth,
    /// Only reachable without a token (login, register).
    GuestOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    Proceed,
    Redirect(&'static str),
}

/// Decide a navigation from the target's requirement and token presence.
pub fn guard(requirement: RouteRequirement, has_token: bool) -> GuardAction {
    match requirement {
        RouteRequirement::RequiresAuth if !has_token => GuardAction::Redirect(LOGIN_PATH),
        RouteRequirement::GuestOnly if has_token => GuardAction::Redirect(HOME_PATH),
        _ => GuardAction::Proceed,
    }
}
