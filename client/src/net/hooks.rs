//! Default request/response hooks installed by [`crate::app::App`].
//!
//! Each hook has one job: bearer injection, failure notification, or session
//! teardown on 401. They are registered in that order.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderValue};

use super::error::ApiError;
use super::http::{RequestContext, RequestHook, ResponseHook};
use crate::router::LOGIN_PATH;
use crate::state::storage::{Storage, TOKEN_KEY, USER_INFO_KEY, read_token};
use crate::util::navigate::Navigator;
use crate::util::notify::Notifier;

/// Attach `Authorization: Bearer <token>` when durable storage holds a token.
pub struct AuthHeaderHook {
    storage: Arc<dyn Storage>,
}

impl AuthHeaderHook {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }
}

impl RequestHook for AuthHeaderHook {
    fn on_request(&self, ctx: &mut RequestContext) {
        let Some(token) = read_token(self.storage.as_ref()) else {
            return;
        };
        match HeaderValue::from_str(&bearer(&token)) {
            Ok(mut value) => {
                value.set_sensitive(true);
                ctx.headers.insert(AUTHORIZATION, value);
            }
            Err(e) => tracing::warn!(error = %e, path = %ctx.path, "stored token is not a valid header value"),
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Report every failure through the notifier.
pub struct NotifyHook {
    notifier: Arc<dyn Notifier>,
}

impl NotifyHook {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }
}

impl ResponseHook for NotifyHook {
    fn on_failure(&self, error: &ApiError) {
        self.notifier.error(error.user_message());
    }
}

/// On 401, drop the durable session and force navigation to the login page.
pub struct SessionExpiryHook {
    storage: Arc<dyn Storage>,
    navigator: Arc<dyn Navigator>,
}

impl SessionExpiryHook {
    pub fn new(storage: Arc<dyn Storage>, navigator: Arc<dyn Navigator>) -> Self {
        Self { storage, navigator }
    }
}

impl ResponseHook for SessionExpiryHook {
    fn on_failure(&self, error: &ApiError) {
        if !error.is_unauthorized() {
            return;
        }
        for key in [TOKEN_KEY, USER_INFO_KEY] {
            if let Err(e) = self.storage.remove(key) {
                tracing::warn!(error = %e, key, "session teardown could not clear storage");
            }
        }
        tracing::info!("session expired");
        self.navigator.navigate(LOGIN_PATH);
    }
}
