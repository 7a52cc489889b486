//! End-to-end pipeline runs against a real directory.
//!
//! The remote endpoint is replaced by a scripted fetcher; files land in a
//! temporary directory through the production [`DirectorySink`].

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use speechbox_core::{AudioFetcher, DownloadError, FetchError, FetchedAudio};
use speechbox_download::{ChunkedDownloader, DirectorySink, DownloadConfig};
use tempfile::TempDir;
use tokio_test::{assert_err, assert_ok};

// ── Scripted fetcher ───────────────────────────────────────────────

/// Answers each request with the next scripted status; past the end of the
/// script every request succeeds. The body echoes the request number.
struct ScriptedFetcher {
    statuses: Mutex<Vec<u16>>,
    seen: Mutex<usize>,
}

impl ScriptedFetcher {
    fn new(statuses: &[u16]) -> Arc<Self> {
        let mut statuses = statuses.to_vec();
        statuses.reverse();
        Arc::new(Self {
            statuses: Mutex::new(statuses),
            seen: Mutex::new(0),
        })
    }

    fn requests(&self) -> usize {
        *self.seen.lock().unwrap()
    }
}

#[async_trait]
impl AudioFetcher for ScriptedFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedAudio, FetchError> {
        let n = {
            let mut seen = self.seen.lock().unwrap();
            *seen += 1;
            *seen
        };
        let status = self.statuses.lock().unwrap().pop().unwrap_or(200);
        if status == 200 {
            Ok(FetchedAudio::ok("audio/mpeg", format!("mp3-{n}")))
        } else {
            Ok(FetchedAudio::with_status(status))
        }
    }
}

// ── Helpers ────────────────────────────────────────────────────────

fn downloader(dir: &TempDir, fetcher: Arc<ScriptedFetcher>) -> ChunkedDownloader {
    let config = DownloadConfig::new()
        .with_relay_url(None)
        .with_chunk_delay(Duration::from_millis(500))
        .with_output_dir(dir.path());
    let sink = Arc::new(DirectorySink::new(dir.path()));
    ChunkedDownloader::new(config, fetcher, sink)
}

fn listing(dir: &TempDir) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn words(n: usize) -> String {
    "speech ".repeat(n)
}

// ── Tests ──────────────────────────────────────────────────────────

#[tokio::test(start_paused = true)]
async fn short_text_produces_speech_mp3() {
    let dir = TempDir::new().unwrap();
    let fetcher = ScriptedFetcher::new(&[]);

    let outcome = assert_ok!(downloader(&dir, fetcher.clone()).download("Hi there", "en").await);

    assert_eq!(outcome.files(), &[dir.path().join("speech.mp3")]);
    assert_eq!(listing(&dir), vec!["speech.mp3"]);
    assert_eq!(std::fs::read(dir.path().join("speech.mp3")).unwrap(), b"mp3-1");
    assert_eq!(fetcher.requests(), 1);
}

#[tokio::test(start_paused = true)]
async fn long_text_produces_numbered_parts() {
    let dir = TempDir::new().unwrap();
    let fetcher = ScriptedFetcher::new(&[]);

    // 7 * 70 = 490 chars -> 3 chunks
    let outcome = assert_ok!(downloader(&dir, fetcher).download(&words(70), "en").await);

    let expected: Vec<PathBuf> = (1..=3)
        .map(|n| dir.path().join(format!("speech_part_{n}.mp3")))
        .collect();
    assert_eq!(outcome.files(), expected.as_slice());
    assert_eq!(
        listing(&dir),
        vec!["speech_part_1.mp3", "speech_part_2.mp3", "speech_part_3.mp3"]
    );
    assert_eq!(
        std::fs::read(dir.path().join("speech_part_3.mp3")).unwrap(),
        b"mp3-3"
    );
}

#[tokio::test(start_paused = true)]
async fn failure_keeps_earlier_parts_only() {
    let dir = TempDir::new().unwrap();
    let fetcher = ScriptedFetcher::new(&[200, 500]);

    let err = assert_err!(downloader(&dir, fetcher.clone()).download(&words(70), "en").await);

    assert_eq!(err, DownloadError::status(2, 500));
    assert_eq!(listing(&dir), vec!["speech_part_1.mp3"]);
    assert_eq!(fetcher.requests(), 2);
}

#[tokio::test(start_paused = true)]
async fn whitespace_input_touches_nothing() {
    let dir = TempDir::new().unwrap();
    let fetcher = ScriptedFetcher::new(&[]);

    let outcome = assert_ok!(downloader(&dir, fetcher.clone()).download(" \t\n", "en").await);

    assert!(outcome.is_skipped());
    assert!(listing(&dir).is_empty());
    assert_eq!(fetcher.requests(), 0);
}
