//! ytgrab library

pub mod auth;
pub mod downloader;
pub mod extractor;
pub mod session;
pub mod utils;

// Re-export main types for easier use
pub use auth::{AuthOptions, FetchOutcome};
pub use downloader::{DownloadOptions, DownloadRequest, QualityChoice};
pub use extractor::{Extractor, Format, QualityListing, VideoInfo, YtDlpExtractor};
pub use session::{Console, StdConsole};
pub use utils::{AppSettings, GrabError};
