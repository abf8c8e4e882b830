//! Wire DTOs for the photo-critique API.
//!
//! DESIGN
//! ======
//! Field names mirror the server's JSON so serde derives stay attribute-free.
//! Timestamps are kept as the server's ISO 8601 strings.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Serialize};

/// Username/password pair. Sent as JSON to register and as a form to login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by `/auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

/// An authenticated user as returned by `/auth/me` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// ISO 8601 creation timestamp, if the server sends one.
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Analysis backend selectable per upload. The server default applies when absent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiModel {
    Deepseek,
    Openai,
    Claude,
}

impl AiModel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deepseek => "deepseek",
            Self::Openai => "openai",
            Self::Claude => "claude",
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AiModel {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "deepseek" => Ok(Self::Deepseek),
            "openai" => Ok(Self::Openai),
            "claude" => Ok(Self::Claude),
            other => Err(format!("unknown model '{other}' (expected deepseek, openai or claude)")),
        }
    }
}

/// Image file to analyze.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
    pub model: Option<AiModel>,
}

/// Per-dimension scores, 0-100.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreDetail {
    pub technical: i32,
    pub composition: i32,
    pub aesthetic: i32,
    pub narrative: i32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisDetail {
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Full analysis record, returned by `/photo/analyze` and `/photo/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoAnalysis {
    pub id: i64,
    pub filename: String,
    pub thumbnail: Option<String>,
    /// `data:` URL of the compressed upload.
    pub image_data: Option<String>,
    pub scores: ScoreDetail,
    pub overall_score: i32,
    pub analysis: AnalysisDetail,
    pub model_used: String,
    pub created_at: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoListItem {
    pub id: i64,
    pub filename: String,
    pub thumbnail: Option<String>,
    pub overall_score: Option<i32>,
    pub created_at: String,
}

/// One page of analysis history, newest first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoPage {
    pub total: u64,
    pub items: Vec<PhotoListItem>,
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// History paging. Serialized as `page` and `page_size`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryQuery {
    pub page: u32,
    pub page_size: u32,
}

impl HistoryQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

impl Default for HistoryQuery {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, page_size: DEFAULT_PAGE_SIZE }
    }
}
