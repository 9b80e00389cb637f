use crate::auth::AuthOptions;
use crate::downloader::DownloadRequest;
use crate::extractor::models::VideoInfo;
use crate::utils::Result;
use async_trait::async_trait;

/// Boundary to the media extraction tool
///
/// This trait isolates the fallback and menu logic from how metadata is
/// fetched and media is downloaded, so the flow can run against a mock.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Returns a unique identifier for this extractor (e.g., "yt-dlp")
    fn id(&self) -> &'static str;

    /// Fetches metadata without downloading.
    ///
    /// Failures that cookies may fix come back as
    /// [`GrabError::AuthRequired`](crate::utils::GrabError::AuthRequired).
    async fn extract_info(&self, url: &str, auth: Option<&AuthOptions>) -> Result<VideoInfo>;

    /// Downloads and merges the selected streams into the request's directory
    async fn download(&self, url: &str, request: &DownloadRequest) -> Result<()>;
}
