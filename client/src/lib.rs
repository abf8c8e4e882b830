//! Client library for the photolens photo-critique service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks HTTP (shared client, hooks, typed endpoints), `state` holds
//! durable storage and the session, `router` decides which pages a session
//! may reach, and `app` wires them together the way the front end's entry
//! point does.

pub mod app;
pub mod config;
pub mod net;
pub mod router;
pub mod state;
pub mod util;

#[cfg(test)]
mod test_support;

pub use app::{App, AppError};
pub use config::ClientConfig;
pub use net::error::ApiError;
