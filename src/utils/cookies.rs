//! Netscape cookie jar inspection
//!
//! yt-dlp reads the cookie file itself; this module only looks at it ahead of
//! time so an obviously broken export can be reported before the retry.

use chrono::Utc;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use crate::utils::error::Result;

const NETSCAPE_HEADERS: [&str; 2] = ["# Netscape HTTP Cookie File", "# HTTP Cookie File"];
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// One line of a cookie jar
#[derive(Debug, Clone, PartialEq)]
pub struct CookieEntry {
    pub domain: String,
    pub include_subdomains: bool,
    pub path: String,
    pub secure: bool,
    /// Unix timestamp; 0 means session cookie
    pub expires: i64,
    pub name: String,
    pub value: String,
    pub http_only: bool,
}

impl CookieEntry {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires != 0 && self.expires < now
    }
}

/// Summary of a cookie jar
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CookieJarReport {
    pub has_header: bool,
    pub entries: Vec<CookieEntry>,
    /// Non-comment lines that are not 7 tab-separated fields
    pub malformed_lines: usize,
}

impl CookieJarReport {
    pub fn expired_count(&self, now: i64) -> usize {
        self.entries.iter().filter(|c| c.is_expired(now)).count()
    }

    /// Human-readable problems worth warning about; empty when the jar looks usable
    pub fn problems(&self, now: i64) -> Vec<String> {
        let mut problems = Vec::new();
        if !self.has_header {
            problems.push("missing '# Netscape HTTP Cookie File' header".to_string());
        }
        if self.entries.is_empty() {
            problems.push("no cookies found".to_string());
        } else if self.expired_count(now) == self.entries.len() {
            problems.push("all cookies are expired, export them again".to_string());
        }
        if self.malformed_lines > 0 {
            problems.push(format!("{} malformed line(s)", self.malformed_lines));
        }
        problems
    }
}

/// Parse cookie jar text
pub fn parse_cookie_jar(content: &str) -> CookieJarReport {
    let mut report = CookieJarReport {
        has_header: content
            .lines()
            .next()
            .map(|first| {
                let first = first.trim_start_matches('\u{feff}').trim();
                NETSCAPE_HEADERS.iter().any(|h| first.starts_with(h))
            })
            .unwrap_or(false),
        ..Default::default()
    };

    for line in content.lines() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let (line, http_only) = match line.strip_prefix(HTTP_ONLY_PREFIX) {
            Some(rest) => (rest, true),
            None if line.starts_with('#') => continue,
            None => (line, false),
        };

        match parse_entry(line, http_only) {
            Some(entry) => report.entries.push(entry),
            None => report.malformed_lines += 1,
        }
    }

    report
}

fn parse_entry(line: &str, http_only: bool) -> Option<CookieEntry> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() != 7 {
        return None;
    }

    Some(CookieEntry {
        domain: fields[0].to_string(),
        include_subdomains: fields[1].eq_ignore_ascii_case("TRUE"),
        path: fields[2].to_string(),
        secure: fields[3].eq_ignore_ascii_case("TRUE"),
        expires: parse_expiry(fields[4])?,
        name: fields[5].to_string(),
        value: fields[6].to_string(),
        http_only,
    })
}

/// Unix seconds; empty means a session cookie. Some exporters write
/// fractional seconds, which are truncated.
fn parse_expiry(field: &str) -> Option<i64> {
    let field = field.trim();
    if field.is_empty() {
        return Some(0);
    }
    if let Ok(secs) = field.parse::<i64>() {
        return Some(secs);
    }
    field
        .parse::<f64>()
        .ok()
        .filter(|secs| secs.is_finite())
        .map(|secs| secs.trunc() as i64)
}

/// Read and inspect a cookie file, logging any problems found
pub async fn inspect_cookie_file(path: &Path) -> Result<CookieJarReport> {
    let content = fs::read_to_string(path).await?;
    let report = parse_cookie_jar(&content);
    let now = Utc::now().timestamp();

    debug!(
        "Cookie file {:?}: {} entries, {} expired",
        path,
        report.entries.len(),
        report.expired_count(now)
    );
    for problem in report.problems(now) {
        warn!("Cookie file {:?}: {}", path, problem);
    }

    Ok(report)
}
