//! Unauthenticated info fetch with a single cookie-based retry
//!
//! The first attempt runs without credentials. When it fails with
//! [`GrabError::AuthRequired`] the user picks a cookie source and the fetch is
//! retried exactly once. Any other failure ends the attempt.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::auth::AuthOptions;
use crate::extractor::{Extractor, VideoInfo};
use crate::session::Console;
use crate::utils::cookies::inspect_cookie_file;
use crate::utils::{GrabError, Result};

/// Result of the info stage for one URL
#[derive(Debug)]
pub enum FetchOutcome {
    /// Metadata is available; `auth` is what the download must reuse
    Ready {
        info: VideoInfo,
        auth: Option<AuthOptions>,
    },
    /// The attempt was abandoned; the reason has already been shown
    Failed(GrabError),
}

impl FetchOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, FetchOutcome::Ready { .. })
    }
}

/// Fetch info for `url`, falling back to cookies when the site demands a login.
///
/// The outer `Result` only carries console failures.
pub async fn fetch_with_fallback<E, C>(
    extractor: &E,
    console: &mut C,
    url: &str,
    cookie_file: &Path,
) -> Result<FetchOutcome>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
{
    console.say("\nFetching video info (no authentication)...");

    let reason = match extractor.extract_info(url, None).await {
        Ok(info) => return Ok(FetchOutcome::Ready { info, auth: None }),
        Err(GrabError::AuthRequired(reason)) => reason,
        Err(e) => {
            console.say(&format!("\n✗ An unexpected error occurred: {}", e));
            return Ok(FetchOutcome::Failed(e));
        }
    };

    info!("Unauthenticated fetch rejected, offering cookie fallback");
    debug!("Rejection reason: {}", reason);
    console.say("\nInitial attempt failed: This video seems to require authentication.");

    let auth = match choose_auth(console, cookie_file).await {
        Ok(auth) => auth,
        Err(GrabError::CookieFileMissing(path)) => {
            console.say(&format!(
                "\nWarning: Cookie file not found at {}",
                path.display()
            ));
            console.say("Please ensure the file exists and is correctly placed.");
            return Ok(FetchOutcome::Failed(GrabError::CookieFileMissing(path)));
        }
        Err(e) => return Err(e),
    };

    console.say(&format!("\nRetrying with cookies from {}...", auth));

    match extractor.extract_info(url, Some(&auth)).await {
        Ok(info) => {
            info!("Authenticated fetch succeeded");
            Ok(FetchOutcome::Ready {
                info,
                auth: Some(auth),
            })
        }
        Err(e) => {
            console.say(&format!("\n✗ Authentication failed: {}", e));
            console.say("Possible reasons:");
            console.say("- Cookies are expired, invalid, or do not have sufficient permissions.");
            console.say("- If using a browser, ensure you are logged into YouTube.");
            console.say("- The video may be region-locked or completely private.");
            Ok(FetchOutcome::Failed(e))
        }
    }
}

/// Ask which cookie source to use.
///
/// Returns [`GrabError::CookieFileMissing`] when the cookie file is chosen but
/// does not exist; the fetch is not attempted in that case.
pub async fn choose_auth<C>(console: &mut C, cookie_file: &Path) -> Result<AuthOptions>
where
    C: Console + ?Sized,
{
    console.say("--- Authentication Options ---");
    console.say("1. Use cookies.txt file (recommended for automation)");
    console.say("2. Use cookies from browser (most reliable, requires browser login)");
    let choice = console
        .ask("Select an option (1-2, default=1): ")
        .await?
        .unwrap_or_default();

    if choice.trim() == "2" {
        let browser = console
            .ask("Enter browser (e.g., chrome, firefox, edge): ")
            .await?
            .unwrap_or_default();
        let profile = console
            .ask("Enter profile (optional, e.g., 'Profile 1', press Enter for default): ")
            .await?
            .unwrap_or_default();

        if let Some(auth) = AuthOptions::from_browser(&browser, &profile) {
            return Ok(auth);
        }
        console.say("No browser specified. Falling back to cookies.txt.");
    }

    cookie_file_auth(cookie_file).await
}

async fn cookie_file_auth(cookie_file: &Path) -> Result<AuthOptions> {
    if !cookie_file.is_file() {
        warn!("Cookie file not found: {}", cookie_file.display());
        return Err(GrabError::CookieFileMissing(cookie_file.to_path_buf()));
    }

    // Problems are logged; yt-dlp gets the final say on whether the jar works
    if let Err(e) = inspect_cookie_file(cookie_file).await {
        warn!("Could not inspect cookie file {}: {}", cookie_file.display(), e);
    }

    Ok(AuthOptions::CookieFile(cookie_file.to_path_buf()))
}
