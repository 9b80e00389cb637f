//! Application configuration

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::downloader::DownloadOptions;
use crate::utils::paths::{program_dir, resolve_path};

pub const DOWNLOAD_DIR_VAR: &str = "DOWNLOAD_DIR";
pub const COOKIE_FILE_VAR: &str = "COOKIE_FILE";
pub const YTDLP_PATH_VAR: &str = "YTDLP_PATH";

pub const DEFAULT_DOWNLOAD_DIR: &str = "Download_Folder";
pub const DEFAULT_COOKIE_FILE: &str = "www.youtube.com_cookies.txt";

/// Application settings
#[derive(Debug, Clone, PartialEq)]
pub struct AppSettings {
    /// Where yt-dlp writes finished files
    pub download_dir: PathBuf,

    /// Netscape cookie jar used for the cookie-file fallback
    pub cookie_file: PathBuf,

    /// Explicit yt-dlp binary; `None` means search for it
    pub ytdlp_path: Option<PathBuf>,

    /// Options for every download call
    pub download: DownloadOptions,
}

impl AppSettings {
    /// Load settings from the process environment.
    ///
    /// A `.env` file is loaded first when present. Relative paths resolve
    /// against the executable's directory.
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => info!("Loaded environment from {:?}", path),
            Err(e) => debug!("No .env loaded: {}", e),
        }
        Self::from_lookup(&program_dir(), |key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup, resolving relative paths against `base_dir`
    pub fn from_lookup<F>(base_dir: &Path, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        // An explicitly empty variable falls back to the base directory itself
        let download_dir = resolve_path(base_dir, &value_or(DOWNLOAD_DIR_VAR, DEFAULT_DOWNLOAD_DIR))
            .unwrap_or_else(|| base_dir.to_path_buf());
        let cookie_file = resolve_path(base_dir, &value_or(COOKIE_FILE_VAR, DEFAULT_COOKIE_FILE))
            .unwrap_or_else(|| base_dir.join(DEFAULT_COOKIE_FILE));
        let ytdlp_path = lookup(YTDLP_PATH_VAR).and_then(|p| resolve_path(base_dir, &p));

        let settings = Self {
            download_dir,
            cookie_file,
            ytdlp_path,
            download: DownloadOptions::default(),
        };
        debug!("Resolved settings: {:?}", settings);
        settings
    }

    /// Apply command line overrides on top of the environment
    pub fn with_overrides(
        mut self,
        download_dir: Option<&str>,
        cookie_file: Option<&str>,
        ytdlp_path: Option<&str>,
    ) -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        if let Some(dir) = download_dir.and_then(|d| resolve_path(&cwd, d)) {
            self.download_dir = dir;
        }
        if let Some(file) = cookie_file.and_then(|f| resolve_path(&cwd, f)) {
            self.cookie_file = file;
        }
        if let Some(path) = ytdlp_path.and_then(|p| resolve_path(&cwd, p)) {
            self.ytdlp_path = Some(path);
        }
        self
    }
}
