//! Quality choices and their yt-dlp format selector expressions

use std::fmt;

/// Best video and best audio merged, mp4/m4a preferred
pub const BEST_EXPR: &str = "bestvideo[ext=mp4]+bestaudio[ext=m4a]/bestvideo+bestaudio/best";
/// Best pre-merged single file
pub const BEST_SINGLE_EXPR: &str = "best[ext=mp4]/best";
pub const P1080_EXPR: &str =
    "bestvideo[height<=1080][ext=mp4]+bestaudio[ext=m4a]/best[height<=1080][ext=mp4]/best";
pub const P720_EXPR: &str =
    "bestvideo[height<=720][ext=mp4]+bestaudio[ext=m4a]/best[height<=720][ext=mp4]/best";

/// What the user asked to download
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QualityChoice {
    #[default]
    Best,
    BestSingle,
    P1080,
    P720,
    /// Raw selector in yt-dlp's own syntax, e.g. `299+140`
    Custom(String),
}

impl QualityChoice {
    /// Parse a preset name, otherwise keep the text as a custom expression.
    ///
    /// Surrounding whitespace is ignored; empty input means [`QualityChoice::Best`].
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "" | "best" => QualityChoice::Best,
            "best_single" => QualityChoice::BestSingle,
            "1080p" => QualityChoice::P1080,
            "720p" => QualityChoice::P720,
            other => QualityChoice::Custom(other.to_string()),
        }
    }

    /// The `-f` expression passed to yt-dlp
    pub fn expression(&self) -> &str {
        match self {
            QualityChoice::Best => BEST_EXPR,
            QualityChoice::BestSingle => BEST_SINGLE_EXPR,
            QualityChoice::P1080 => P1080_EXPR,
            QualityChoice::P720 => P720_EXPR,
            QualityChoice::Custom(expr) => expr.as_str(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            QualityChoice::Best => "best",
            QualityChoice::BestSingle => "best_single",
            QualityChoice::P1080 => "1080p",
            QualityChoice::P720 => "720p",
            QualityChoice::Custom(expr) => expr.as_str(),
        }
    }
}

impl fmt::Display for QualityChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the interactive quality menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Best,
    P1080,
    BestSingle,
    Custom,
}

impl MenuEntry {
    /// Menu rows in display order; the index is the number the user types
    pub fn all() -> &'static [MenuEntry] {
        &[
            MenuEntry::Best,
            MenuEntry::P1080,
            MenuEntry::BestSingle,
            MenuEntry::Custom,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Best => "Best available quality (recommended, merges video+audio)",
            MenuEntry::P1080 => "Best 1080p",
            MenuEntry::BestSingle => "Best single file (pre-merged, might be lower quality)",
            MenuEntry::Custom => "Custom format string",
        }
    }

    /// Map the user's answer to a menu row. Anything unrecognized picks row 0.
    pub fn from_input(input: &str) -> MenuEntry {
        let all = Self::all();
        let input = input.trim();
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return all[0];
        }
        input
            .parse::<usize>()
            .ok()
            .and_then(|idx| all.get(idx).copied())
            .unwrap_or(all[0])
    }

    /// The preset behind this row; `None` for [`MenuEntry::Custom`]
    pub fn preset(&self) -> Option<QualityChoice> {
        match self {
            MenuEntry::Best => Some(QualityChoice::Best),
            MenuEntry::P1080 => Some(QualityChoice::P1080),
            MenuEntry::BestSingle => Some(QualityChoice::BestSingle),
            MenuEntry::Custom => None,
        }
    }
}
