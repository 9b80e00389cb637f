//! yt-dlp wrapper for info extraction and downloading
//!
//! yt-dlp runs as a child process. Info comes from `yt-dlp -J`; downloads
//! stream yt-dlp's progress straight to the terminal while its stderr is
//! collected for error reporting.

use crate::auth::AuthOptions;
use crate::downloader::DownloadRequest;
use crate::extractor::models::VideoInfo;
use crate::extractor::traits::Extractor;
use crate::utils::error::{GrabError, Result};
use crate::utils::paths::output_template;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as AsyncCommand;
use tracing::{debug, error, info, warn};

/// Extractor backed by the yt-dlp executable
pub struct YtDlpExtractor {
    ytdlp_path: PathBuf,
}

impl YtDlpExtractor {
    /// Initialize extractor and verify yt-dlp availability
    ///
    /// Search order:
    /// 1. Explicit path (from `YTDLP_PATH` or `--ytdlp`)
    /// 2. Next to the executable
    /// 3. System PATH
    /// 4. Common installation paths (Homebrew, pip --user, etc.)
    pub fn new(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if path.is_file() {
                info!("Using configured yt-dlp: {}", path.display());
                return Ok(Self::with_path(path.to_path_buf()));
            }
            warn!("Configured yt-dlp does not exist: {}", path.display());
        }

        match find_ytdlp() {
            Some(path) => {
                info!("Found yt-dlp at: {}", path.display());
                Ok(Self::with_path(path))
            }
            None => {
                error!("yt-dlp not found anywhere!");
                Err(GrabError::YtDlpNotFound)
            }
        }
    }

    pub fn with_path(ytdlp_path: PathBuf) -> Self {
        Self { ytdlp_path }
    }

    /// Get the path to yt-dlp being used
    pub fn ytdlp_path(&self) -> &Path {
        &self.ytdlp_path
    }

    /// Query `yt-dlp --version`
    pub async fn version(&self) -> Result<String> {
        let output = AsyncCommand::new(&self.ytdlp_path)
            .arg("--version")
            .kill_on_drop(true)
            .output()
            .await?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl Extractor for YtDlpExtractor {
    fn id(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract_info(&self, url: &str, auth: Option<&AuthOptions>) -> Result<VideoInfo> {
        let args = info_args(url, auth);
        debug!("Extracting video info: yt-dlp {}", args.join(" "));

        let output = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            let error_msg = error_lines(&error_msg).unwrap_or_else(|| {
                format!("yt-dlp exited with {}", output.status)
            });
            error!("yt-dlp extraction failed: {}", error_msg);
            return Err(GrabError::from_extraction_message(error_msg));
        }

        let json_str = String::from_utf8_lossy(&output.stdout);
        let video_info: VideoInfo = serde_json::from_str(&json_str)?;
        debug!(
            "Extracted '{}' with {} formats",
            video_info.display_title(),
            video_info.formats.len()
        );

        Ok(video_info)
    }

    async fn download(&self, url: &str, request: &DownloadRequest) -> Result<()> {
        tokio::fs::create_dir_all(&request.download_dir).await?;

        let args = download_args(url, request);
        debug!("Downloading: yt-dlp {}", args.join(" "));

        let mut child = AsyncCommand::new(&self.ytdlp_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        // Echo stderr (warnings, errors) and keep it for the failure message.
        // Titles may arrive in the console code page, so lines are decoded lossily
        // and a read error only stops the echo, never the child.
        let mut collected = String::new();
        if let Some(stderr) = child.stderr.take() {
            let mut segments = BufReader::new(stderr).split(b'\n');
            loop {
                match segments.next_segment().await {
                    Ok(Some(bytes)) => {
                        let line = String::from_utf8_lossy(&bytes);
                        let line = line.trim_end_matches('\r');
                        eprintln!("{}", line);
                        collected.push_str(line);
                        collected.push('\n');
                    }
                    Ok(None) => break,
                    Err(e) => {
                        warn!("Stopped reading yt-dlp stderr: {}", e);
                        break;
                    }
                }
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            let message = error_lines(&collected)
                .unwrap_or_else(|| format!("yt-dlp exited with {}", status));
            error!("yt-dlp download failed: {}", message);
            return Err(GrabError::DownloadError(message));
        }

        info!("Download finished into {}", request.download_dir.display());
        Ok(())
    }
}

/// Arguments for an info-only call
pub fn info_args(url: &str, auth: Option<&AuthOptions>) -> Vec<String> {
    let mut args: Vec<String> = ["-J", "--skip-download", "--no-warnings"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    if let Some(auth) = auth {
        args.extend(auth.to_args());
    }
    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// Arguments for a download call
pub fn download_args(url: &str, request: &DownloadRequest) -> Vec<String> {
    let options = &request.options;
    let mut args = vec![
        "-f".to_string(),
        request.format_selection().to_string(),
        "-o".to_string(),
        output_template(&request.download_dir),
        "--merge-output-format".to_string(),
        options.merge_output_format.clone(),
    ];

    if options.no_playlist {
        args.push("--no-playlist".to_string());
    }
    if options.geo_bypass {
        args.push("--geo-bypass".to_string());
        if let Some(country) = &options.geo_bypass_country {
            args.push("--geo-bypass-country".to_string());
            args.push(country.clone());
        }
    }

    args.extend([
        "--extractor-retries".to_string(),
        options.extractor_retries.to_string(),
        "--fragment-retries".to_string(),
        options.fragment_retries.to_string(),
    ]);
    if options.skip_unavailable_fragments {
        args.push("--skip-unavailable-fragments".to_string());
    }
    args.extend([
        "--concurrent-fragments".to_string(),
        options.concurrent_fragments.to_string(),
        "--user-agent".to_string(),
        options.user_agent.clone(),
        "--socket-timeout".to_string(),
        options.socket_timeout.to_string(),
    ]);
    args.push(if options.keep_video {
        "--keep-video".to_string()
    } else {
        "--no-keep-video".to_string()
    });

    if let Some(auth) = &request.auth {
        args.extend(auth.to_args());
    }

    args.push("--".to_string());
    args.push(url.to_string());
    args
}

/// The `ERROR:` lines of yt-dlp output, or the whole trimmed text when there are none
fn error_lines(stderr: &str) -> Option<String> {
    let errors: Vec<&str> = stderr
        .lines()
        .map(str::trim)
        .filter(|l| l.starts_with("ERROR:"))
        .collect();

    if !errors.is_empty() {
        return Some(errors.join("\n"));
    }

    let trimmed = stderr.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ============================================================
// yt-dlp Detection Functions
// ============================================================

/// Find yt-dlp binary with priority:
/// 1. Next to the executable
/// 2. System PATH
/// 3. Common installation paths
pub fn find_ytdlp() -> Option<PathBuf> {
    if let Some(local) = find_beside_executable() {
        info!("✓ Using yt-dlp next to executable: {:?}", local);
        return Some(local);
    }

    if let Some(system) = find_in_path() {
        info!("✓ Using system yt-dlp: {:?}", system);
        return Some(system);
    }

    if let Some(common) = find_in_common_paths() {
        info!("✓ Using yt-dlp from common path: {:?}", common);
        return Some(common);
    }

    warn!("✗ yt-dlp not found anywhere!");
    None
}

fn binary_name() -> &'static str {
    if cfg!(windows) {
        "yt-dlp.exe"
    } else {
        "yt-dlp"
    }
}

/// Find yt-dlp shipped alongside the executable
fn find_beside_executable() -> Option<PathBuf> {
    let exe_path = std::env::current_exe().ok()?;
    debug!("Current executable: {:?}", exe_path);

    let candidate = exe_path.parent()?.join(binary_name());
    (candidate.is_file() && is_executable(&candidate)).then_some(candidate)
}

/// Find yt-dlp in system PATH using `which`
fn find_in_path() -> Option<PathBuf> {
    which::which("yt-dlp").ok().filter(|path| path.exists())
}

/// Find yt-dlp in common installation paths
fn find_in_common_paths() -> Option<PathBuf> {
    let common_paths = [
        // macOS Homebrew (Apple Silicon)
        "/opt/homebrew/bin/yt-dlp",
        // macOS Homebrew (Intel)
        "/usr/local/bin/yt-dlp",
        // System
        "/usr/bin/yt-dlp",
        // Python.org installation
        "/Library/Frameworks/Python.framework/Versions/Current/bin/yt-dlp",
        // pip --user
        "~/.local/bin/yt-dlp",
    ];

    common_paths.iter().find_map(|path_str| {
        let expanded = match path_str.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()?.join(rest),
            None => PathBuf::from(path_str),
        };
        (expanded.is_file() && is_executable(&expanded)).then_some(expanded)
    })
}

/// Check if a file is executable
#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    // Any executable bit counts
    std::fs::metadata(path)
        .map(|metadata| metadata.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    // On Windows, just check if file exists
    path.exists()
}

// ============================================================
// Tests
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::{DownloadOptions, QualityChoice};

    fn request(quality: QualityChoice, auth: Option<AuthOptions>) -> DownloadRequest {
        DownloadRequest::new(quality, PathBuf::from("/data/out"), DownloadOptions::default())
            .with_auth(auth)
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    /// Shell script standing in for yt-dlp; it ignores its arguments
    #[cfg(unix)]
    fn fake_ytdlp(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("yt-dlp");
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_survives_non_utf8_stderr() {
        let temp = tempfile::TempDir::new().unwrap();
        let marker = temp.path().join("finished");
        let script = fake_ytdlp(
            temp.path(),
            &format!(
                "printf 'WARNING: title \\377\\376 bad\\n' >&2\nsleep 1\ntouch '{}'\nexit 0",
                marker.display()
            ),
        );

        let extractor = YtDlpExtractor::with_path(script);
        let request = DownloadRequest::new(
            QualityChoice::Best,
            temp.path().join("out"),
            DownloadOptions::default(),
        );
        let result = extractor.download("https://youtu.be/abc", &request).await;

        assert!(result.is_ok(), "download failed: {:?}", result);
        assert!(marker.exists(), "yt-dlp was stopped before it finished");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_download_failure_keeps_error_lines_from_non_utf8_stderr() {
        let temp = tempfile::TempDir::new().unwrap();
        let script = fake_ytdlp(
            temp.path(),
            "printf 'WARNING: \\377 noise\\nERROR: [youtube] abc: Requested format is not available\\n' >&2\nexit 1",
        );

        let extractor = YtDlpExtractor::with_path(script);
        let request = DownloadRequest::new(
            QualityChoice::Custom("999".to_string()),
            temp.path().join("out"),
            DownloadOptions::default(),
        );

        match extractor.download("https://youtu.be/abc", &request).await {
            Err(GrabError::DownloadError(message)) => {
                assert_eq!(message, "ERROR: [youtube] abc: Requested format is not available");
            }
            other => panic!("expected a download error, got {:?}", other),
        }
    }

    #[test]
    fn test_find_ytdlp() {
        let result = find_ytdlp();
        println!("yt-dlp found at: {:?}", result);
        // Don't assert - yt-dlp might not be installed in CI
    }

    #[test]
    fn test_is_executable() {
        let path = PathBuf::from("/bin/sh");
        if path.exists() {
            assert!(is_executable(&path));
        }
    }

    #[test]
    fn test_info_args_without_auth() {
        let args = info_args("https://youtu.be/abc", None);
        assert_eq!(
            args,
            vec!["-J", "--skip-download", "--no-warnings", "--", "https://youtu.be/abc"]
        );
    }

    #[test]
    fn test_info_args_with_cookie_file() {
        let auth = AuthOptions::CookieFile(PathBuf::from("/tmp/c.txt"));
        let args = info_args("https://youtu.be/abc", Some(&auth));
        assert_eq!(value_after(&args, "--cookies"), Some("/tmp/c.txt"));
        assert_eq!(args.last().map(String::as_str), Some("https://youtu.be/abc"));
    }

    #[test]
    fn test_download_args_best() {
        let args = download_args("https://youtu.be/abc", &request(QualityChoice::Best, None));

        assert_eq!(
            value_after(&args, "-f"),
            Some("bestvideo[ext=mp4]+bestaudio[ext=m4a]/bestvideo+bestaudio/best")
        );
        assert!(value_after(&args, "-o").unwrap().ends_with("%(title)s.%(ext)s"));
        assert_eq!(value_after(&args, "--merge-output-format"), Some("mp4"));
        assert_eq!(value_after(&args, "--geo-bypass-country"), Some("US"));
        assert_eq!(value_after(&args, "--extractor-retries"), Some("3"));
        assert_eq!(value_after(&args, "--fragment-retries"), Some("10"));
        assert_eq!(value_after(&args, "--concurrent-fragments"), Some("5"));
        assert_eq!(value_after(&args, "--socket-timeout"), Some("30"));
        assert!(args.iter().any(|a| a == "--no-playlist"));
        assert!(args.iter().any(|a| a == "--skip-unavailable-fragments"));
        assert!(args.iter().any(|a| a == "--no-keep-video"));
        assert!(!args.iter().any(|a| a.starts_with("--cookies")));
    }

    #[test]
    fn test_download_args_with_browser_cookies() {
        let auth = AuthOptions::Browser("firefox:default".to_string());
        let args = download_args(
            "https://youtu.be/abc",
            &request(QualityChoice::P720, Some(auth)),
        );
        assert_eq!(value_after(&args, "--cookies-from-browser"), Some("firefox:default"));
        assert!(!args.iter().any(|a| a == "--cookies"));
    }

    #[test]
    fn test_error_lines_prefers_error_prefix() {
        let stderr = "WARNING: something\nERROR: [youtube] abc: Private video\n";
        assert_eq!(
            error_lines(stderr).as_deref(),
            Some("ERROR: [youtube] abc: Private video")
        );
    }

    #[test]
    fn test_error_lines_falls_back_to_text() {
        assert_eq!(error_lines("  boom \n").as_deref(), Some("boom"));
        assert_eq!(error_lines("   "), None);
    }
}
