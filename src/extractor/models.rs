//! Data structures for video information as reported by `yt-dlp -J`

use serde::{Deserialize, Deserializer, Serialize};

/// Video information structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub extractor: Option<String>,
    #[serde(default)]
    pub formats: Vec<Format>,
}

/// yt-dlp writes `null` for ids some extractors cannot fill in
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl VideoInfo {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }
}

/// One downloadable stream variant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Format {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub format_id: String,
    #[serde(default)]
    pub ext: Option<String>,
    pub vcodec: Option<String>,
    pub acodec: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub abr: Option<f64>, // Audio bitrate (kbps)
    pub tbr: Option<f64>, // Total bitrate
    pub filesize: Option<u64>,
    pub filesize_approx: Option<u64>,
    pub format_note: Option<String>,
}

impl Format {
    /// Has a real video stream
    pub fn is_video(&self) -> bool {
        matches!(self.vcodec.as_deref(), Some(v) if v != "none")
    }

    /// Audio stream with no video stream
    pub fn is_audio_only(&self) -> bool {
        matches!(self.acodec.as_deref(), Some(a) if a != "none") && !self.is_video()
    }

    /// Whether the format carries audio. Unknown acodec counts as audio.
    pub fn has_audio(&self) -> bool {
        self.acodec.as_deref() != Some("none")
    }

    /// Exact size, else approximate size, else 0
    pub fn size(&self) -> u64 {
        self.filesize
            .filter(|s| *s > 0)
            .or(self.filesize_approx)
            .unwrap_or(0)
    }
}
