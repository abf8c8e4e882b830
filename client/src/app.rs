//! Application wiring and page flows.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`App`] owns the single shared [`HttpClient`] (with the default hooks
//! installed), the [`SessionStore`] and the [`Router`]. Page flows enter their
//! page through the router first, so a signed-out caller asking for history is
//! redirected exactly as a browser would be.
//!
//! ERROR HANDLING
//! ==============
//! API failures have already been reported by the transport hooks when they
//! reach a page flow; flows only add their own success notices and keep the
//! in-memory session in step after a 401 teardown.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::net::error::ApiError;
use crate::net::hooks::{AuthHeaderHook, NotifyHook, SessionExpiryHook};
use crate::net::http::HttpClient;
use crate::net::types::{Credentials, HistoryQuery, PhotoAnalysis, PhotoPage, PhotoUpload, User};
use crate::net::{auth, photo};
use crate::router::{HOME_PATH, LOGIN_PATH, Navigation, Router};
use crate::state::session::SessionStore;
use crate::state::storage::{Storage, StorageError};
use crate::util::navigate::Navigator;
use crate::util::notify::Notifier;

const HISTORY_PATH: &str = "/history";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error("navigation to {from} redirected to {to}")]
    Redirected { from: String, to: String },
}

pub struct App {
    config: ClientConfig,
    http: HttpClient,
    session: SessionStore,
    router: Router,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl App {
    /// Build the shared client with hooks in order: bearer injection on
    /// requests; notification then 401 teardown on failures.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        storage: Arc<dyn Storage>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ApiError> {
        let http = HttpClient::new(&config)?
            .with_request_hook(AuthHeaderHook::new(storage.clone()))
            .with_response_hook(NotifyHook::new(notifier.clone()))
            .with_response_hook(SessionExpiryHook::new(storage.clone(), navigator.clone()));
        Ok(Self {
            config,
            http,
            session: SessionStore::new(storage.clone()),
            router: Router::new(storage),
            notifier,
            navigator,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Run the guard for `path`; on redirect, navigate there and refuse.
    fn enter(&self, path: &str) -> Result<Navigation, AppError> {
        let nav = self.router.navigate(path);
        if nav.redirected {
            self.navigator.navigate(&nav.path);
            return Err(AppError::Redirected { from: path.to_owned(), to: nav.path });
        }
        Ok(nav)
    }

    /// Keep the in-memory session in step with a 401 teardown.
    fn settle<T>(&mut self, result: Result<T, ApiError>) -> Result<T, AppError> {
        if let Err(error) = &result {
            if error.is_unauthorized() {
                self.session.reload();
            }
        }
        result.map_err(AppError::from)
    }

    /// Login page submit: exchange credentials, store the token, load the
    /// profile and go home.
    ///
    /// # Errors
    ///
    /// Fails if the login page is not reachable, the server rejects the
    /// credentials, or the token cannot be stored.
    pub async fn sign_in(&mut self, credentials: &Credentials) -> Result<Option<User>, AppError> {
        self.enter(LOGIN_PATH)?;
        let token = auth::login(&self.http, credentials).await;
        let token = self.settle(token)?;
        self.session.set_token(&token.access_token)?;
        let user = self.session.fetch_user_info(&self.http).await;
        if user.is_some() {
            tracing::info!(username = %credentials.username, "signed in");
            self.notifier.success("Login successful");
            self.navigator.navigate(HOME_PATH);
        }
        Ok(user)
    }

    /// Register page submit: create the account and go to the login page.
    ///
    /// # Errors
    ///
    /// Fails if the register page is not reachable or the server rejects the
    /// registration.
    pub async fn register(&mut self, credentials: &Credentials) -> Result<User, AppError> {
        self.enter("/register")?;
        let user = auth::register(&self.http, credentials).await;
        let user = self.settle(user)?;
        self.notifier.success("Registration successful, please sign in");
        self.navigator.navigate(LOGIN_PATH);
        Ok(user)
    }

    /// Drop the session and go to the login page.
    ///
    /// # Errors
    ///
    /// Returns the storage error if the durable token cannot be removed.
    pub fn sign_out(&mut self) -> Result<(), AppError> {
        self.session.logout()?;
        tracing::info!("signed out");
        self.navigator.navigate(LOGIN_PATH);
        Ok(())
    }

    /// Profile for the home page header.
    ///
    /// # Errors
    ///
    /// Fails only if the home page is not reachable; fetch failures sign out
    /// and yield `None`.
    pub async fn current_user(&mut self) -> Result<Option<User>, AppError> {
        self.enter(HOME_PATH)?;
        Ok(self.session.fetch_user_info(&self.http).await)
    }

    /// Home page upload.
    ///
    /// # Errors
    ///
    /// Fails if the home page is not reachable or the analysis call fails.
    pub async fn analyze(&mut self, upload: PhotoUpload) -> Result<PhotoAnalysis, AppError> {
        self.enter(HOME_PATH)?;
        let result = photo::analyze_photo(&self.http, upload).await;
        let analysis = self.settle(result)?;
        self.notifier.success("Analysis complete");
        Ok(analysis)
    }

    /// # Errors
    ///
    /// Fails if the history page is not reachable or the fetch fails.
    pub async fn history(&mut self, query: HistoryQuery) -> Result<PhotoPage, AppError> {
        self.enter(HISTORY_PATH)?;
        let result = photo::get_history(&self.http, query).await;
        self.settle(result)
    }

    /// # Errors
    ///
    /// Fails if the detail page is not reachable or the fetch fails.
    pub async fn photo_detail(&mut self, photo_id: i64) -> Result<PhotoAnalysis, AppError> {
        self.enter(&format!("/detail/{photo_id}"))?;
        let result = photo::get_photo_detail(&self.http, photo_id).await;
        self.settle(result)
    }

    /// History page delete action.
    ///
    /// # Errors
    ///
    /// Fails if the history page is not reachable or the delete fails.
    pub async fn delete_photo(&mut self, photo_id: i64) -> Result<(), AppError> {
        self.enter(HISTORY_PATH)?;
        let result = photo::delete_photo(&self.http, photo_id).await;
        self.settle(result)?;
        self.notifier.success("Deleted");
        Ok(())
    }
}
