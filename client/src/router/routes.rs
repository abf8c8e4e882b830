//! Static route table.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use super::guard::RouteRequirement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Login,
    Register,
    Home,
    History,
    Detail,
}

impl RouteName {
    pub fn requirement(self) -> RouteRequirement {
        match self {
            Self::Login | Self::Register => RouteRequirement::GuestOnly,
            Self::Home | Self::History | Self::Detail => RouteRequirement::RequiresAuth,
        }
    }
}

/// `(pattern, name)`; `:param` segments match any non-empty segment. Static
/// segments compare ASCII case-insensitively.
const ROUTES: &[(&str, RouteName)] = &[
    ("/login", RouteName::Login),
    ("/register", RouteName::Register),
    ("/", RouteName::Home),
    ("/history", RouteName::History),
    ("/detail/:id", RouteName::Detail),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute {
    pub name: RouteName,
    pub params: Vec<(String, String)>,
}

impl MatchedRoute {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

/// Match `path` (query and fragment ignored) against the route table.
pub fn match_route(path: &str) -> Option<MatchedRoute> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let segments = split_segments(path);
    ROUTES.iter().find_map(|(pattern, name)| {
        match_pattern(pattern, &segments).map(|params| MatchedRoute { name: *name, params })
    })
}

fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn match_pattern(pattern: &str, segments: &[&str]) -> Option<Vec<(String, String)>> {
    let expected = split_segments(pattern);
    if expected.len() != segments.len() {
        return None;
    }
    let mut params = Vec::new();
    for (want, got) in expected.iter().zip(segments) {
        if let Some(key) = want.strip_prefix(':') {
            params.push((key.to_owned(), (*got).to_owned()));
        } else if !want.eq_ignore_ascii_case(got) {
            return None;
        }
    }
    Some(params)
}
