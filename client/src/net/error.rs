//! Transport and server error taxonomy.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Shown when neither the server nor the transport gave a usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// A request body could not be serialized.
    #[error("request encode failed: {0}")]
    Encode(String),

    /// Timeout, refused connection, DNS failure and friends.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// A success body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Decode(String),
}

impl ApiError {
    /// Build a status error from a failed response body.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        Self::Status { status, message: failure_message(body) }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Text for the user-facing notification.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Status { message, .. } => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Extract the server's `detail` string, falling back to the generic message.
pub(crate) fn failure_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        detail: Option<serde_json::Value>,
    }

    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail)
        .and_then(|detail| match detail {
            serde_json::Value::String(text) if !text.is_empty() => Some(text),
            _ => None,
        })
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_owned())
}
