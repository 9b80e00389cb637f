//! Fixed download settings handed to yt-dlp

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::auth::AuthOptions;
use crate::downloader::QualityChoice;

/// Desktop Chrome user agent, sent so requests look like a normal browser
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Download configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadOptions {
    /// Container the merged video+audio ends up in
    pub merge_output_format: String,

    /// Only fetch the single video even if the URL points into a playlist
    pub no_playlist: bool,

    pub geo_bypass: bool,
    pub geo_bypass_country: Option<String>,

    /// Retries for the extraction step
    pub extractor_retries: u32,

    /// Retries per fragment
    pub fragment_retries: u32,

    pub skip_unavailable_fragments: bool,

    /// Fragments fetched in parallel by yt-dlp
    pub concurrent_fragments: u32,

    pub user_agent: String,

    /// Socket timeout in seconds
    pub socket_timeout: u32,

    /// Keep the separate video/audio streams after merging
    pub keep_video: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            merge_output_format: "mp4".to_string(),
            no_playlist: true,
            geo_bypass: true,
            geo_bypass_country: Some("US".to_string()),
            extractor_retries: 3,
            fragment_retries: 10,
            skip_unavailable_fragments: true,
            concurrent_fragments: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            socket_timeout: 30,
            keep_video: false,
        }
    }
}

/// Everything one download call needs besides the URL
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadRequest {
    pub quality: QualityChoice,
    pub download_dir: PathBuf,
    pub auth: Option<AuthOptions>,
    pub options: DownloadOptions,
}

impl DownloadRequest {
    pub fn new(quality: QualityChoice, download_dir: PathBuf, options: DownloadOptions) -> Self {
        Self {
            quality,
            download_dir,
            auth: None,
            options,
        }
    }

    pub fn with_auth(mut self, auth: Option<AuthOptions>) -> Self {
        self.auth = auth;
        self
    }

    /// The `-f` expression for this request
    pub fn format_selection(&self) -> &str {
        self.quality.expression()
    }
}
