//! Property tests: which yt-dlp failures enter the cookie fallback.

mod common;

use common::{MockExtractor, ScriptedConsole};
use proptest::prelude::*;
use std::path::Path;
use ytgrab::auth::{fetch_with_fallback, FetchOutcome};
use ytgrab::utils::error::{is_auth_related, AUTH_KEYWORDS};
use ytgrab::utils::GrabError;

fn keyword() -> impl Strategy<Value = String> {
    (prop::sample::select(AUTH_KEYWORDS.to_vec()), any::<u64>()).prop_map(|(kw, mask)| {
        // Randomize the case of each character
        kw.chars()
            .enumerate()
            .map(|(i, c)| {
                if mask >> (i % 64) & 1 == 1 {
                    c.to_ascii_uppercase()
                } else {
                    c
                }
            })
            .collect()
    })
}

/// Enters the fallback iff the auth menu is shown; the cookie file never exists here
fn entered_fallback(message: &str) -> (bool, FetchOutcome) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime");
    rt.block_on(async {
        let extractor = MockExtractor::new(vec![Err(GrabError::from_extraction_message(message))]);
        let mut console = ScriptedConsole::new(["1"]);
        let outcome = fetch_with_fallback(
            &extractor,
            &mut console,
            "https://example.com/v",
            Path::new("/nonexistent/cookies.txt"),
        )
        .await
        .expect("flow");
        (console.output().contains("Authentication Options"), outcome)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn messages_with_keyword_enter_fallback(
        prefix in "[ -~]{0,30}",
        kw in keyword(),
        suffix in "[ -~]{0,30}",
    ) {
        let message = format!("{}{}{}", prefix, kw, suffix);
        prop_assert!(is_auth_related(&message));

        let (entered, outcome) = entered_fallback(&message);
        prop_assert!(entered);
        prop_assert!(matches!(outcome, FetchOutcome::Failed(GrabError::CookieFileMissing(_))));
    }

    #[test]
    fn messages_without_keyword_skip_fallback(message in "[0-9xzXZ:/. _-]{0,60}") {
        prop_assert!(!is_auth_related(&message));

        let (entered, outcome) = entered_fallback(&message);
        prop_assert!(!entered);
        prop_assert!(matches!(outcome, FetchOutcome::Failed(GrabError::ExtractionError(_))));
    }
}

#[test]
fn realistic_ytdlp_messages() {
    let auth = [
        "ERROR: [youtube] abc: Sign in to confirm your age",
        "ERROR: [youtube] abc: Private video. Sign in if you've been granted access to this video",
        "ERROR: [youtube] abc: Video unavailable. This video is restricted",
        "ERROR: [instagram] abc: Requested content is not available, rate-limit reached or login required",
    ];
    for message in auth {
        assert!(GrabError::from_extraction_message(message).is_auth_required(), "{}", message);
    }

    let other = [
        "ERROR: Unsupported URL: https://example.com/",
        "ERROR: [generic] Unable to download JSON metadata: HTTP Error 404: Not Found",
    ];
    for message in other {
        assert!(!GrabError::from_extraction_message(message).is_auth_required(), "{}", message);
    }
}
