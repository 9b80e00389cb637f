//! Error handling for ytgrab

use std::path::PathBuf;
use thiserror::Error;

/// Substrings (lowercase) that mark a yt-dlp failure as an authentication problem
pub const AUTH_KEYWORDS: [&str; 6] = [
    "age",
    "restricted",
    "sign in",
    "login",
    "private",
    "unavailable",
];

/// Main error type for ytgrab
#[derive(Debug, Error)]
pub enum GrabError {
    #[error("yt-dlp not found. Please install yt-dlp")]
    YtDlpNotFound,

    /// The site refused the request in a way cookies may fix
    #[error("Authentication required: {0}")]
    AuthRequired(String),

    #[error("Failed to extract video info: {0}")]
    ExtractionError(String),

    #[error("Download failed: {0}")]
    DownloadError(String),

    #[error("Cookie file not found at {}", .0.display())]
    CookieFileMissing(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl GrabError {
    /// Classify a failed info fetch from the text yt-dlp printed.
    ///
    /// yt-dlp only reports failures as human-readable text, so this is the one
    /// place keyword matching happens. Callers branch on the returned variant.
    pub fn from_extraction_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if is_auth_related(&message) {
            GrabError::AuthRequired(message)
        } else {
            GrabError::ExtractionError(message)
        }
    }

    /// Whether an authenticated retry may succeed where this attempt failed
    pub fn is_auth_required(&self) -> bool {
        matches!(self, GrabError::AuthRequired(_))
    }
}

/// Case-insensitive match against [`AUTH_KEYWORDS`]
pub fn is_auth_related(message: &str) -> bool {
    let lowered = message.to_lowercase();
    AUTH_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
}

pub type Result<T> = std::result::Result<T, GrabError>;
