//! Path resolution relative to the program's own location
//!
//! Relative paths in the environment (`DOWNLOAD_DIR`, `COOKIE_FILE`) are
//! resolved against the directory holding the executable, not the current
//! working directory, so the tool behaves the same no matter where it is
//! launched from.

use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Get the directory containing the running executable.
///
/// Falls back to the current directory, then to `.`.
pub fn program_dir() -> PathBuf {
    let dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| {
            warn!("Could not determine executable location, using current directory");
            std::env::current_dir().ok()
        })
        .unwrap_or_else(|| PathBuf::from("."));

    debug!("Program directory: {:?}", dir);
    dir
}

/// Resolve a configured path.
///
/// Empty input resolves to `None`. Absolute paths are kept; relative ones are
/// joined onto `base`. The result is normalized (no `.`/`..` components).
pub fn resolve_path(base: &Path, value: &str) -> Option<PathBuf> {
    if value.is_empty() {
        return None;
    }

    let path = Path::new(value);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let resolved = joined
        .absolutize()
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| joined.clone());
    Some(resolved)
}

/// Output template handed to yt-dlp: `<dir>/%(title)s.%(ext)s`
pub fn output_template(download_dir: &Path) -> String {
    download_dir
        .join("%(title)s.%(ext)s")
        .to_string_lossy()
        .into_owned()
}
