//! Durable storage and the in-memory session mirror.

pub mod session;
pub mod storage;
