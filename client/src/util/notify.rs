//! User-facing notifications.
//!
//! The transport layer reports every failed call here before handing the
//! error back to its caller; page flows report their own successes.

/// Sink for short user-facing messages (toast/banner equivalent).
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
    fn success(&self, message: &str);
}

/// Routes notices to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        tracing::error!(%message, "notice");
    }

    fn success(&self, message: &str) {
        tracing::info!(%message, "notice");
    }
}
