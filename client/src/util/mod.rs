//! Side-effect seams used by the transport hooks and page flows.

pub mod navigate;
pub mod notify;
