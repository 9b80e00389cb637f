//! Authentication options and the cookie fallback used for gated videos

pub mod fallback;

use std::fmt;
use std::path::PathBuf;

pub use fallback::{fetch_with_fallback, FetchOutcome};

/// Credentials passed to yt-dlp for one URL attempt.
///
/// Exactly one cookie source is ever set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOptions {
    /// Netscape cookie jar on disk (`--cookies`)
    CookieFile(PathBuf),
    /// Browser cookie source in yt-dlp syntax, e.g. `chrome:Profile 1` (`--cookies-from-browser`)
    Browser(String),
}

impl AuthOptions {
    /// Build a browser source from a name and an optional profile.
    ///
    /// The browser name is lowercased. Returns `None` when no browser is given.
    pub fn from_browser(browser: &str, profile: &str) -> Option<Self> {
        let browser = browser.trim().to_lowercase();
        if browser.is_empty() {
            return None;
        }
        let profile = profile.trim();
        let source = if profile.is_empty() {
            browser
        } else {
            format!("{}:{}", browser, profile)
        };
        Some(AuthOptions::Browser(source))
    }

    /// yt-dlp arguments selecting this cookie source
    pub fn to_args(&self) -> Vec<String> {
        match self {
            AuthOptions::CookieFile(path) => vec![
                "--cookies".to_string(),
                path.to_string_lossy().into_owned(),
            ],
            AuthOptions::Browser(source) => {
                vec!["--cookies-from-browser".to_string(), source.clone()]
            }
        }
    }
}

impl fmt::Display for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthOptions::CookieFile(path) => write!(f, "{}", path.display()),
            AuthOptions::Browser(source) => f.write_str(source),
        }
    }
}
