use std::sync::Arc;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde_json::json;

use super::*;
use crate::net::http::{ApiRequest, HttpClient};
use crate::state::storage::MemoryStorage;
use crate::test_support::{MockServer, RecordingNavigator, RecordingNotifier};

fn ctx(path: &str) -> RequestContext {
    RequestContext { method: Method::GET, path: path.to_owned(), headers: HeaderMap::new() }
}

fn storage_with_token(token: &str) -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_KEY, token).unwrap();
    storage
}

#[test]
fn auth_header_hook_injects_bearer_token() {
    let hook = AuthHeaderHook::new(storage_with_token("abc.def"));
    let mut ctx = ctx("/auth/me");
    hook.on_request(&mut ctx);
    assert_eq!(ctx.headers.get(AUTHORIZATION).unwrap(), "Bearer abc.def");
}

#[test]
fn auth_header_hook_skips_missing_or_empty_token() {
    let hook = AuthHeaderHook::new(Arc::new(MemoryStorage::new()));
    let mut missing = ctx("/auth/me");
    hook.on_request(&mut missing);
    assert!(missing.headers.get(AUTHORIZATION).is_none());

    let hook = AuthHeaderHook::new(storage_with_token(""));
    let mut empty = ctx("/auth/me");
    hook.on_request(&mut empty);
    assert!(empty.headers.get(AUTHORIZATION).is_none());
}

#[test]
fn auth_header_hook_reads_storage_at_request_time() {
    let storage = Arc::new(MemoryStorage::new());
    let hook = AuthHeaderHook::new(storage.clone());

    storage.set(TOKEN_KEY, "late").unwrap();
    let mut ctx = ctx("/photo/history");
    hook.on_request(&mut ctx);
    assert_eq!(ctx.headers.get(AUTHORIZATION).unwrap(), "Bearer late");
}

#[test]
fn auth_header_hook_skips_unencodable_token() {
    let hook = AuthHeaderHook::new(storage_with_token("bad\ntoken"));
    let mut ctx = ctx("/auth/me");
    hook.on_request(&mut ctx);
    assert!(ctx.headers.get(AUTHORIZATION).is_none());
}

#[test]
fn notify_hook_reports_user_message() {
    let notifier = Arc::new(RecordingNotifier::default());
    let hook = NotifyHook::new(notifier.clone());

    hook.on_failure(&ApiError::from_response(400, br#"{"detail":"Username taken"}"#));
    hook.on_failure(&ApiError::Transport("timed out".to_owned()));

    assert_eq!(notifier.errors(), vec!["Username taken".to_owned(), "Request failed".to_owned()]);
}

#[test]
fn session_expiry_hook_tears_down_on_401() {
    let storage = storage_with_token("expired");
    storage.set(USER_INFO_KEY, "{}").unwrap();
    storage.set("theme", "dark").unwrap();
    let navigator = Arc::new(RecordingNavigator::default());
    let hook = SessionExpiryHook::new(storage.clone(), navigator.clone());

    hook.on_failure(&ApiError::from_response(401, b"{}"));

    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_INFO_KEY), None);
    assert_eq!(storage.get("theme").as_deref(), Some("dark"));
    assert_eq!(navigator.visits(), vec!["/login".to_owned()]);
}

#[test]
fn session_expiry_hook_ignores_other_failures() {
    let storage = storage_with_token("valid");
    let navigator = Arc::new(RecordingNavigator::default());
    let hook = SessionExpiryHook::new(storage.clone(), navigator.clone());

    hook.on_failure(&ApiError::from_response(403, b"{}"));
    hook.on_failure(&ApiError::from_response(500, b"{}"));
    hook.on_failure(&ApiError::Transport("refused".to_owned()));

    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("valid"));
    assert!(navigator.visits().is_empty());
}

#[tokio::test]
async fn wired_client_sends_bearer_and_tears_down_on_401() {
    let server = MockServer::start().await;
    server.respond("GET", "/api/auth/me", 401, json!({ "detail": "Could not validate credentials" }));
    let storage = storage_with_token("stale");
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(RecordingNavigator::default());
    let client = HttpClient::new(&server.config())
        .unwrap()
        .with_request_hook(AuthHeaderHook::new(storage.clone()))
        .with_response_hook(NotifyHook::new(notifier.clone()))
        .with_response_hook(SessionExpiryHook::new(storage.clone(), navigator.clone()));

    let err = client.send::<serde_json::Value>(ApiRequest::get("/auth/me")).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(server.only_request().header("authorization").as_deref(), Some("Bearer stale"));
    assert_eq!(notifier.errors(), vec!["Could not validate credentials".to_owned()]);
    assert_eq!(storage.get(TOKEN_KEY), None);
    assert_eq!(storage.get(USER_INFO_KEY), None);
    assert_eq!(navigator.visits(), vec!["/login".to_owned()]);
}

#[tokio::test]
async fn wired_client_omits_header_without_token() {
    let server = MockServer::start().await;
    server.respond("POST", "/api/auth/register", 200, json!({ "id": 1, "username": "ana" }));
    let storage = Arc::new(MemoryStorage::new());
    let client = HttpClient::new(&server.config()).unwrap().with_request_hook(AuthHeaderHook::new(storage));

    let _: serde_json::Value = client
        .send(ApiRequest::post("/auth/register").json(&json!({ "username": "ana" })).unwrap())
        .await
        .unwrap();

    assert!(server.only_request().header("authorization").is_none());
}
