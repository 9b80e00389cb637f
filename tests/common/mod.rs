//! Shared test doubles: an in-memory extractor that records every call and a
//! console fed from a fixed list of answers

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use ytgrab::auth::AuthOptions;
use ytgrab::downloader::{DownloadOptions, DownloadRequest};
use ytgrab::extractor::{Extractor, Format, VideoInfo};
use ytgrab::session::Console;
use ytgrab::utils::{AppSettings, GrabError, Result};

pub struct MockExtractor {
    info_responses: Mutex<VecDeque<Result<VideoInfo>>>,
    download_response: Mutex<Option<Result<()>>>,
    hang_downloads: bool,
    pub info_calls: Mutex<Vec<Option<AuthOptions>>>,
    pub downloads: Mutex<Vec<(String, DownloadRequest)>>,
}

impl MockExtractor {
    /// Info calls answer from `responses` in order; downloads succeed
    pub fn new(responses: Vec<Result<VideoInfo>>) -> Self {
        Self {
            info_responses: Mutex::new(responses.into()),
            download_response: Mutex::new(None),
            hang_downloads: false,
            info_calls: Mutex::new(Vec::new()),
            downloads: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_download(self, error: GrabError) -> Self {
        *self.download_response.lock().unwrap() = Some(Err(error));
        self
    }

    /// Downloads never finish, like a long transfer the user gives up on
    pub fn hanging_download(mut self) -> Self {
        self.hang_downloads = true;
        self
    }

    pub fn info_calls(&self) -> Vec<Option<AuthOptions>> {
        self.info_calls.lock().unwrap().clone()
    }

    pub fn downloads(&self) -> Vec<(String, DownloadRequest)> {
        self.downloads.lock().unwrap().clone()
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn extract_info(&self, _url: &str, auth: Option<&AuthOptions>) -> Result<VideoInfo> {
        self.info_calls.lock().unwrap().push(auth.cloned());
        self.info_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GrabError::ExtractionError("no scripted response".to_string())))
    }

    async fn download(&self, url: &str, request: &DownloadRequest) -> Result<()> {
        self.downloads
            .lock()
            .unwrap()
            .push((url.to_string(), request.clone()));
        if self.hang_downloads {
            std::future::pending::<()>().await;
        }
        self.download_response.lock().unwrap().take().unwrap_or(Ok(()))
    }
}

/// Console answering from a fixed list, recording everything printed
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedConsole {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Lines printed and prompts shown, in order
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn output(&self) -> String {
        self.transcript.join("\n")
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

#[async_trait]
impl Console for ScriptedConsole {
    fn say(&mut self, text: &str) {
        self.transcript.push(text.to_string());
    }

    async fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }
}

pub fn sample_format(id: &str, height: u32, acodec: &str) -> Format {
    Format {
        format_id: id.to_string(),
        ext: Some("mp4".to_string()),
        vcodec: Some("avc1.640028".to_string()),
        acodec: Some(acodec.to_string()),
        height: Some(height),
        fps: Some(30.0),
        filesize: Some(1_024 * u64::from(height)),
        ..Default::default()
    }
}

pub fn sample_video() -> VideoInfo {
    VideoInfo {
        id: "vid123".to_string(),
        title: Some("Sample Video".to_string()),
        webpage_url: Some("https://example.com/watch?v=vid123".to_string()),
        formats: vec![
            sample_format("22", 720, "mp4a.40.2"),
            sample_format("137", 1080, "none"),
        ],
        ..Default::default()
    }
}

pub fn settings(cookie_file: PathBuf) -> AppSettings {
    AppSettings {
        download_dir: PathBuf::from("/tmp/ytgrab-test-downloads"),
        cookie_file,
        ytdlp_path: None,
        download: DownloadOptions::default(),
    }
}
