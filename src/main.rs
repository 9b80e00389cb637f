//! ytgrab - best-quality video downloader
//!
//! Interactive front end over yt-dlp that picks the highest-quality streams
//! and falls back to cookie authentication for gated videos.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use ytgrab::extractor::YtDlpExtractor;
use ytgrab::session::{self, StdConsole};
use ytgrab::utils::AppSettings;

#[derive(Parser)]
#[command(
    name = "ytgrab",
    about = "Download videos in the best available quality, with cookie fallback for gated content"
)]
struct Args {
    /// Download a single URL and exit instead of prompting
    #[arg(long)]
    url: Option<String>,

    /// Directory to save downloads in (overrides DOWNLOAD_DIR)
    #[arg(long)]
    download_dir: Option<String>,

    /// Netscape cookie file for gated videos (overrides COOKIE_FILE)
    #[arg(long)]
    cookie_file: Option<String>,

    /// Path to the yt-dlp executable (overrides YTDLP_PATH)
    #[arg(long)]
    ytdlp: Option<String>,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging on stderr so it stays out of the prompts
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let settings = AppSettings::from_env().with_overrides(
        args.download_dir.as_deref(),
        args.cookie_file.as_deref(),
        args.ytdlp.as_deref(),
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let extractor = match YtDlpExtractor::new(settings.ytdlp_path.as_deref()) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("{}", e);
                eprintln!("Please install yt-dlp:");
                eprintln!("  pip install yt-dlp");
                eprintln!("  or: brew install yt-dlp");
                eprintln!("  or visit: https://github.com/yt-dlp/yt-dlp");
                std::process::exit(1);
            }
        };

        tracing::info!("Using yt-dlp at {}", extractor.ytdlp_path().display());
        match extractor.version().await {
            Ok(version) => tracing::info!("yt-dlp version {}", version),
            Err(e) => tracing::warn!("Could not query yt-dlp version: {}", e),
        }
        println!("Downloads go to: {}", settings.download_dir.display());

        let mut console = StdConsole::new();
        match args.url {
            Some(url) => {
                if !session::run_once(&extractor, &mut console, &settings, &url).await? {
                    std::process::exit(1);
                }
            }
            None => session::run(&extractor, &mut console, &settings).await?,
        }
        Ok::<(), anyhow::Error>(())
    })
}
