//! Utility modules for error handling, configuration and file inspection

pub mod config;
pub mod cookies;
pub mod error;
pub mod paths;

// Re-export for convenience
pub use config::AppSettings;
pub use cookies::{inspect_cookie_file, CookieJarReport};
pub use error::{GrabError, Result};
pub use paths::{output_template, program_dir, resolve_path};
