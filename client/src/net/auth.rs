//! Auth endpoints: register, login, current user.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use super::error::ApiError;
use super::http::{ApiRequest, HttpClient};
use super::types::{Credentials, TokenResponse, User};

const REGISTER_PATH: &str = "/auth/register";
const LOGIN_PATH: &str = "/auth/login";
const ME_PATH: &str = "/auth/me";

/// Create an account via `POST /auth/register` with a JSON body.
///
/// # Errors
///
/// Returns the transport or server error after the client's hooks ran.
pub async fn register(http: &HttpClient, data: &Credentials) -> Result<User, ApiError> {
    http.send(ApiRequest::post(REGISTER_PATH).json(data)?).await
}

/// Exchange credentials for a bearer token via `POST /auth/login`.
///
/// The login endpoint takes an OAuth2 password form, so the body is
/// form-urlencoded rather than JSON.
///
/// # Errors
///
/// Returns the transport or server error after the client's hooks ran.
pub async fn login(http: &HttpClient, data: &Credentials) -> Result<TokenResponse, ApiError> {
    http.send(ApiRequest::post(LOGIN_PATH).form(data)?).await
}

/// Fetch the user owning the current bearer token via `GET /auth/me`.
///
/// # Errors
///
/// Returns the transport or server error after the client's hooks ran.
pub async fn get_me(http: &HttpClient) -> Result<User, ApiError> {
    http.send(ApiRequest::get(ME_PATH)).await
}
