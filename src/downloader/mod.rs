//! Download configuration: quality presets and the options passed to yt-dlp

pub mod options;
pub mod quality;

pub use options::{DownloadOptions, DownloadRequest, DEFAULT_USER_AGENT};
pub use quality::{MenuEntry, QualityChoice};
