//! Session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Durable storage is the system of record for the bearer token; this store
//! keeps an in-memory mirror plus the fetched profile for the UI. Every token
//! mutation goes through [`SessionStore::set_token`] or
//! [`SessionStore::logout`], which write both copies.
//!
//! The router guard deliberately does not read this store; it checks durable
//! storage directly.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::Arc;

use super::storage::{Storage, StorageError, TOKEN_KEY, read_token};
use crate::net::auth;
use crate::net::http::HttpClient;
use crate::net::types::User;

pub struct SessionStore {
    storage: Arc<dyn Storage>,
    token: String,
    user_info: Option<User>,
}

impl SessionStore {
    /// Start from whatever token durable storage already holds.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let token = read_token(storage.as_ref()).unwrap_or_default();
        Self { storage, token, user_info: None }
    }

    /// Current token; empty when signed out.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_info(&self) -> Option<&User> {
        self.user_info.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// Store `token` durably, then mirror it in memory.
    ///
    /// # Errors
    ///
    /// Returns the storage error; the in-memory token is left unchanged.
    pub fn set_token(&mut self, token: &str) -> Result<(), StorageError> {
        self.storage.set(TOKEN_KEY, token)?;
        self.token = token.to_owned();
        Ok(())
    }

    /// Drop the token and profile from memory and the token from durable storage.
    ///
    /// Other durable keys are left alone.
    ///
    /// # Errors
    ///
    /// Returns the storage error after the in-memory state is already cleared.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        self.token.clear();
        self.user_info = None;
        self.storage.remove(TOKEN_KEY)
    }

    /// Fetch and cache the profile for the current token.
    ///
    /// Returns `None` without a request when signed out. Any fetch failure
    /// signs out, so an expired token ends in the same state as no token.
    pub async fn fetch_user_info(&mut self, http: &HttpClient) -> Option<User> {
        if self.token.is_empty() {
            return None;
        }
        match auth::get_me(http).await {
            Ok(user) => {
                self.user_info = Some(user.clone());
                Some(user)
            }
            Err(error) => {
                tracing::info!(%error, "profile fetch failed; signing out");
                if let Err(e) = self.logout() {
                    tracing::warn!(error = %e, "logout could not clear storage");
                }
                None
            }
        }
    }

    /// Re-read the token from durable storage and drop the cached profile.
    ///
    /// This is the state a forced navigation leaves behind: a fresh store
    /// built from storage.
    pub fn reload(&mut self) {
        self.token = read_token(self.storage.as_ref()).unwrap_or_default();
        self.user_info = None;
    }
}
