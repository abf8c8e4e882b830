//! Forced navigation.
//!
//! In the browser this is a full `location.href` assignment; here it is a
//! seam so the 401 teardown hook and page flows can be observed in tests and
//! rendered by the CLI.

pub trait Navigator: Send + Sync {
    /// Replace the current location with `path`, discarding in-memory state.
    fn navigate(&self, path: &str);
}
