//! Shared HTTP client with ordered request/response hooks.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every API module call goes through [`HttpClient::send`]. Request hooks run
//! synchronously, in registration order, before the request leaves; response
//! hooks run on failures before the error is returned to the caller. On
//! success the caller sees only the decoded body.
//!
//! TRADE-OFFS
//! ==========
//! Hooks see the error, not the raw response, so they cannot rewrite a
//! failure into a success. Nothing in this client needs that.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use reqwest::Method;
use reqwest::header::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use crate::config::ClientConfig;

// =============================================================================
// HOOK SEAMS
// =============================================================================

/// Per-call request state visible to request hooks.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    /// Path relative to the API base, e.g. `/auth/me`.
    pub path: String,
    pub headers: HeaderMap,
}

/// Runs before each request is sent; may add headers.
pub trait RequestHook: Send + Sync {
    fn on_request(&self, ctx: &mut RequestContext);
}

/// Runs for each failed call before the error reaches the caller.
pub trait ResponseHook: Send + Sync {
    fn on_failure(&self, error: &ApiError);
}

// =============================================================================
// REQUEST
// =============================================================================

#[derive(Debug)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// Encoded as `application/x-www-form-urlencoded`.
    Form(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

/// A request against a path under the API base.
#[derive(Debug)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), query: Vec::new(), body: RequestBody::Empty }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be represented as JSON.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Json(to_value(body)?);
        Ok(self)
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be represented as a flat map.
    pub fn form<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = RequestBody::Form(to_value(body)?);
        Ok(self)
    }

    #[must_use]
    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }
}

fn to_value<T: Serialize + ?Sized>(body: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct HttpClient {
    http: reqwest::Client,
    api_base: String,
    request_hooks: Vec<Box<dyn RequestHook>>,
    response_hooks: Vec<Box<dyn ResponseHook>>,
}

impl HttpClient {
    /// Build a client bound to `config.api_base()` with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ClientBuild`] if the TLS backend fails to initialise.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::ClientBuild(e.to_string()))?;
        Ok(Self { http, api_base: config.api_base(), request_hooks: Vec::new(), response_hooks: Vec::new() })
    }

    #[must_use]
    pub fn with_request_hook(mut self, hook: impl RequestHook + 'static) -> Self {
        self.request_hooks.push(Box::new(hook));
        self
    }

    #[must_use]
    pub fn with_response_hook(mut self, hook: impl ResponseHook + 'static) -> Self {
        self.response_hooks.push(Box::new(hook));
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Send `request` and decode the success body as `T`.
    ///
    /// An empty success body decodes as JSON `null`, so `T = ()` fits
    /// `204 No Content` endpoints.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] after every response hook has seen it.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let result = self.execute(request).await;
        if let Err(error) = &result {
            tracing::warn!(%error, "api request failed");
            for hook in &self.response_hooks {
                hook.on_failure(error);
            }
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let ApiRequest { method, path, query, body } = request;
        let mut ctx = RequestContext { method, path, headers: HeaderMap::new() };
        for hook in &self.request_hooks {
            hook.on_request(&mut ctx);
        }

        let url = format!("{}{}", self.api_base, ctx.path);
        tracing::debug!(method = %ctx.method, %url, "api request");

        let mut builder = self.http.request(ctx.method, &url).headers(ctx.headers);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(value) => builder.form(&value),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| ApiError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &bytes));
        }
        decode_body(&bytes)
    }
}

fn decode_body<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
    let bytes = if bytes.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { bytes };
    serde_json::from_slice(bytes).map_err(|e| ApiError::Decode(e.to_string()))
}
