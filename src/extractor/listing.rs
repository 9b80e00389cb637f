//! Quality listing: groups formats into video buckets and picks the best audio

use crate::extractor::models::{Format, VideoInfo};

/// Buckets at or above this height are always shown
pub const HIGH_QUALITY_MIN_HEIGHT: u32 = 1080;

/// Video formats sharing a quality key such as `1080p60`
#[derive(Debug, Clone, PartialEq)]
pub struct QualityBucket {
    pub key: String,
    pub height: u32,
    pub formats: Vec<Format>,
}

impl QualityBucket {
    /// The largest format in the bucket; ties keep the first one seen
    pub fn representative(&self) -> Option<&Format> {
        self.formats.iter().reduce(|best, f| {
            if f.size() > best.size() {
                f
            } else {
                best
            }
        })
    }
}

/// Result of grouping a video's formats
#[derive(Debug, Clone, PartialEq)]
pub struct QualityListing {
    pub title: String,
    /// Every bucket, highest first
    pub buckets: Vec<QualityBucket>,
    /// Highest-bitrate audio-only format
    pub best_audio: Option<Format>,
}

impl QualityListing {
    /// Group the formats of `info`
    pub fn from_info(info: &VideoInfo) -> Self {
        let mut buckets: Vec<QualityBucket> = Vec::new();
        let mut audio: Vec<&Format> = Vec::new();

        for format in &info.formats {
            if format.format_id.is_empty() {
                continue;
            }

            if format.is_video() {
                let height = format.height.unwrap_or(0);
                let key = quality_key(height, format.fps);
                match buckets.iter_mut().find(|b| b.key == key) {
                    Some(bucket) => bucket.formats.push(format.clone()),
                    None => buckets.push(QualityBucket {
                        key,
                        height,
                        formats: vec![format.clone()],
                    }),
                }
            } else if format.is_audio_only() {
                audio.push(format);
            }
        }

        // Stable: equal heights keep first-seen order
        buckets.sort_by(|a, b| b.height.cmp(&a.height));

        let best_audio = audio
            .into_iter()
            .reduce(|best, f| if abr(f) > abr(best) { f } else { best })
            .cloned();

        Self {
            title: info.display_title().to_string(),
            buckets,
            best_audio,
        }
    }

    /// Buckets worth showing: all 1080p+ ones, or else only the single best
    pub fn displayed(&self) -> Vec<&QualityBucket> {
        let high: Vec<&QualityBucket> = self
            .buckets
            .iter()
            .filter(|b| b.height >= HIGH_QUALITY_MIN_HEIGHT)
            .collect();

        if high.is_empty() {
            self.buckets.first().into_iter().collect()
        } else {
            high
        }
    }

    /// All quality keys, highest first
    pub fn sorted_keys(&self) -> Vec<&str> {
        self.buckets.iter().map(|b| b.key.as_str()).collect()
    }

    /// Text menu printed before the quality prompt
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nVideo Title: {}\n", self.title));
        out.push_str(&"-".repeat(50));
        out.push('\n');

        out.push_str("\nAvailable video qualities:\n");
        for bucket in self.displayed() {
            if let Some(best) = bucket.representative() {
                let vcodec = best.vcodec.as_deref().unwrap_or("unknown");
                let audio = if best.has_audio() {
                    " (includes audio)"
                } else {
                    ""
                };
                out.push_str(&format!("  - {} ({}){}\n", bucket.key, vcodec, audio));
            }
        }

        if let Some(audio) = &self.best_audio {
            out.push_str(&format!(
                "\nBest audio: {}kbps ({})\n",
                format_number(abr(audio)),
                audio.acodec.as_deref().unwrap_or("unknown")
            ));
        }

        out
    }
}

fn abr(format: &Format) -> f64 {
    format.abr.unwrap_or(0.0)
}

/// `<height>p<fps>`, with the fps suffix dropped when absent, zero or 30
pub fn quality_key(height: u32, fps: Option<f64>) -> String {
    match fps {
        Some(fps) if fps != 0.0 && fps != 30.0 => format!("{}p{}", height, format_number(fps)),
        _ => format!("{}p", height),
    }
}

/// Integral values print without a fractional part
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
