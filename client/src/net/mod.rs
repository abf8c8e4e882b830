//! Networking: the shared HTTP client, its hooks, and the API endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the transport wrapper, `hooks` the default cross-cutting
//! behaviour, `auth`/`photo` the endpoint functions and `types` the wire
//! schema.

pub mod auth;
pub mod error;
pub mod hooks;
pub mod http;
pub mod photo;
pub mod types;
