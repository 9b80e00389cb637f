pub mod listing;
pub mod models;
pub mod traits;
pub mod ytdlp;

pub use listing::{QualityBucket, QualityListing};
pub use models::{Format, VideoInfo};
pub use traits::Extractor;
pub use ytdlp::YtDlpExtractor;
