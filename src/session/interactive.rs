//! The interactive download loop

use std::future::Future;
use tracing::{debug, info, warn};

use crate::auth::{fetch_with_fallback, AuthOptions, FetchOutcome};
use crate::downloader::{DownloadRequest, MenuEntry, QualityChoice};
use crate::extractor::{Extractor, QualityListing, VideoInfo};
use crate::session::Console;
use crate::utils::{AppSettings, Result};

const EXIT_COMMAND: &str = "exit";
const URL_PROMPT: &str =
    "\nPlease paste the URL of the video you want to download (or type 'exit' to quit): ";

/// Show the quality menu for `info`, then download the user's pick.
///
/// Download failures are reported and turn into `Ok(false)`.
pub async fn select_and_download<E, C>(
    extractor: &E,
    console: &mut C,
    settings: &AppSettings,
    url: &str,
    info: &VideoInfo,
    auth: Option<AuthOptions>,
) -> Result<bool>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
{
    let listing = QualityListing::from_info(info);
    console.say(listing.render().trim_end());

    let quality = prompt_quality(console).await?;
    let request = DownloadRequest::new(
        quality,
        settings.download_dir.clone(),
        settings.download.clone(),
    )
    .with_auth(auth);

    console.say(&format!(
        "\nDownloading with format selection: {}",
        request.format_selection()
    ));
    console.say(
        "This may take a moment as yt-dlp downloads the best video and audio streams separately and merges them...",
    );

    match extractor.download(url, &request).await {
        Ok(()) => Ok(true),
        Err(e) => {
            console.say(&format!(
                "An error occurred during selection or download: {}",
                e
            ));
            Ok(false)
        }
    }
}

/// Ask for a menu row, and for a raw expression when "custom" is picked
pub async fn prompt_quality<C>(console: &mut C) -> Result<QualityChoice>
where
    C: Console + ?Sized,
{
    console.say("\n--- Select Quality ---");
    for (idx, entry) in MenuEntry::all().iter().enumerate() {
        console.say(&format!("  {}. {}", idx, entry.label()));
    }

    let answer = console
        .ask(&format!(
            "\nSelect an option (0-{}, default=0): ",
            MenuEntry::all().len() - 1
        ))
        .await?
        .unwrap_or_default();
    let entry = MenuEntry::from_input(&answer);

    match entry.preset() {
        Some(preset) => {
            console.say(&format!("Selected: {}", entry.label()));
            Ok(preset)
        }
        None => {
            console.say(
                "\nEnter custom format string (e.g., '299+140' or 'bestvideo[height<=1080]+bestaudio'):",
            );
            let expr = console.ask("Format: ").await?.unwrap_or_default();
            Ok(QualityChoice::parse(&expr))
        }
    }
}

/// Full pipeline for one URL: info fetch with fallback, quality menu, download
pub async fn download_with_fallback<E, C>(
    extractor: &E,
    console: &mut C,
    settings: &AppSettings,
    url: &str,
) -> Result<bool>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
{
    match fetch_with_fallback(extractor, console, url, &settings.cookie_file).await? {
        FetchOutcome::Ready { info, auth } => {
            select_and_download(extractor, console, settings, url, &info, auth).await
        }
        FetchOutcome::Failed(e) => {
            debug!("Info stage failed for {}: {}", url, e);
            Ok(false)
        }
    }
}

/// Run the pipeline for one URL and print the verdict.
///
/// Ctrl-C aborts the attempt (killing yt-dlp) and returns `Ok(false)`.
pub async fn run_once<E, C>(
    extractor: &E,
    console: &mut C,
    settings: &AppSettings,
    url: &str,
) -> Result<bool>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
{
    run_once_until(extractor, console, settings, url, interrupted()).await
}

/// [`run_once`] with the attempt cut short when `interrupt` resolves
pub async fn run_once_until<E, C, F>(
    extractor: &E,
    console: &mut C,
    settings: &AppSettings,
    url: &str,
    interrupt: F,
) -> Result<bool>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
    F: Future<Output = ()>,
{
    let outcome = tokio::select! {
        biased;
        _ = interrupt => None,
        result = download_with_fallback(extractor, &mut *console, settings, url) => Some(result),
    };

    match outcome {
        Some(Ok(true)) => {
            info!("Finished {}", url);
            console.say("✓ Download completed successfully!");
            Ok(true)
        }
        Some(Ok(false)) => {
            console.say("✗ Download failed after trying all available methods.");
            Ok(false)
        }
        Some(Err(e)) => {
            warn!("Attempt for {} aborted: {}", url, e);
            console.say(&format!("✗ An unexpected error occurred: {}", e));
            Ok(false)
        }
        None => {
            info!("Attempt for {} interrupted", url);
            console.say("\nDownload interrupted by user.");
            Ok(false)
        }
    }
}

/// Prompt for URLs until the user types `exit`, input closes, or Ctrl-C
/// arrives at the prompt. Ctrl-C during an attempt only aborts that attempt.
pub async fn run<E, C>(extractor: &E, console: &mut C, settings: &AppSettings) -> Result<()>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
{
    run_until(extractor, console, settings, interrupted).await
}

/// [`run`] with interrupts taken from `interrupt`, called once per prompt and
/// once per attempt
pub async fn run_until<E, C, I, F>(
    extractor: &E,
    console: &mut C,
    settings: &AppSettings,
    mut interrupt: I,
) -> Result<()>
where
    E: Extractor + ?Sized,
    C: Console + ?Sized,
    I: FnMut() -> F,
    F: Future<Output = ()>,
{
    console.say("YouTube Video Downloader - Best Quality Edition");
    console.say(&"=".repeat(50));
    console.say(
        "This tool will automatically download the highest quality video and audio available.",
    );

    loop {
        let answer = tokio::select! {
            biased;
            _ = interrupt() => None,
            answer = console.ask(URL_PROMPT) => Some(answer?),
        };

        let Some(answer) = answer else {
            debug!("Interrupted at the URL prompt");
            console.say("");
            console.say("Exiting the downloader. Goodbye!");
            break;
        };
        let Some(line) = answer else {
            debug!("Input closed");
            console.say("");
            console.say("Exiting the downloader. Goodbye!");
            break;
        };

        let url = line.trim();
        if url.eq_ignore_ascii_case(EXIT_COMMAND) {
            console.say("Exiting the downloader. Goodbye!");
            break;
        }
        if url.is_empty() {
            console.say("URL cannot be empty. Please try again.");
            continue;
        }

        run_once_until(extractor, console, settings, url, interrupt()).await?;
    }

    Ok(())
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Could not listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}
