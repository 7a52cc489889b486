//! Sequential chunked download driver.
//!
//! # Design Principles
//!
//! - One request at a time, fully awaited, in chunk order
//! - The first failing chunk aborts the run; earlier files stay on disk
//! - A fixed pause separates consecutive requests
//! - Cancellation is handled via `tokio::select!` around the request and the
//!   pause
//! - At most one run per downloader; a second concurrent call is rejected

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use speechbox_core::{
    AudioFetcher, AudioSink, DownloadError, DownloadEvent, DownloadOutcome, DownloadResult,
    FetchError, TextChunk,
};

use crate::chunker::split_into_chunks;
use crate::config::DownloadConfig;
use crate::http::ReqwestFetcher;
use crate::sink::DirectorySink;
use crate::url::build_request_url;

/// Downloads synthesized speech for a text, one chunk at a time.
pub struct ChunkedDownloader {
    config: DownloadConfig,
    fetcher: Arc<dyn AudioFetcher>,
    sink: Arc<dyn AudioSink>,
    in_progress: AtomicBool,
    last_error: Mutex<Option<String>>,
    events: Option<mpsc::UnboundedSender<DownloadEvent>>,
}

/// Clears the in-progress flag on every exit path.
struct InProgressGuard<'a>(&'a AtomicBool);

impl<'a> InProgressGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InProgressGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ChunkedDownloader {
    /// Create a downloader over explicit ports.
    pub fn new(
        config: DownloadConfig,
        fetcher: Arc<dyn AudioFetcher>,
        sink: Arc<dyn AudioSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
            in_progress: AtomicBool::new(false),
            last_error: Mutex::new(None),
            events: None,
        }
    }

    /// Create a downloader that fetches over HTTP and saves into
    /// `config.output_dir`.
    pub fn from_config(config: DownloadConfig) -> Result<Self, FetchError> {
        let fetcher = Arc::new(ReqwestFetcher::new(&config)?);
        let sink = Arc::new(DirectorySink::new(config.output_dir.clone()));
        Ok(Self::new(config, fetcher, sink))
    }

    /// Attach a progress channel. Returns the downloader and the receiver.
    #[must_use]
    pub fn with_events(mut self) -> (Self, mpsc::UnboundedReceiver<DownloadEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        self.events = Some(tx);
        (self, rx)
    }

    pub const fn config(&self) -> &DownloadConfig {
        &self.config
    }

    /// Whether a download is currently running.
    pub fn is_downloading(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// User message of the most recent failed run, cleared when a new run
    /// starts.
    pub fn last_error(&self) -> Option<String> {
        self.last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Download speech for `text` in `language` (a two-letter code such as
    /// `"en"`).
    pub async fn download(&self, text: &str, language: &str) -> DownloadResult<DownloadOutcome> {
        self.download_with_cancel(text, language, CancellationToken::new())
            .await
    }

    /// Like [`download`](Self::download), aborting with
    /// [`DownloadError::Cancelled`] once `cancel` fires.
    pub async fn download_with_cancel(
        &self,
        text: &str,
        language: &str,
        cancel: CancellationToken,
    ) -> DownloadResult<DownloadOutcome> {
        if text.trim().is_empty() {
            tracing::debug!("Download skipped: no text");
            return Ok(DownloadOutcome::Skipped);
        }

        let Some(_guard) = InProgressGuard::acquire(&self.in_progress) else {
            tracing::debug!("Download rejected: another download is running");
            return Err(DownloadError::AlreadyInProgress);
        };

        self.set_last_error(None);

        let chunks = split_into_chunks(text, self.config.chunk_size);
        let total_chunks = chunks.len();
        tracing::info!(total_chunks, language, "Starting chunked download");
        self.emit(DownloadEvent::Started { total_chunks });

        match self.run_chunks(&chunks, language, &cancel).await {
            Ok(files) => {
                tracing::info!(files = files.len(), "Download complete");
                self.emit(DownloadEvent::Completed {
                    files: files.clone(),
                });
                Ok(DownloadOutcome::Completed { files })
            }
            Err(err) => {
                let message = err.user_message();
                if err.is_cancelled() {
                    tracing::info!("Download cancelled");
                } else {
                    tracing::warn!(chunk = ?err.chunk(), error = %err, "Download failed");
                }
                self.set_last_error(Some(message.clone()));
                self.emit(DownloadEvent::Failed { message });
                Err(err)
            }
        }
    }

    async fn run_chunks(
        &self,
        chunks: &[TextChunk],
        language: &str,
        cancel: &CancellationToken,
    ) -> DownloadResult<Vec<PathBuf>> {
        let total = chunks.len();
        let mut files = Vec::with_capacity(total);

        for chunk in chunks {
            let path = self.fetch_and_save(chunk, total, language, cancel).await?;
            self.emit(DownloadEvent::ChunkSaved {
                chunk: chunk.number(),
                total_chunks: total,
                path: path.clone(),
            });
            files.push(path);

            let is_last = chunk.number() == total;
            if !is_last && !self.config.chunk_delay.is_zero() {
                tokio::select! {
                    biased;

                    () = cancel.cancelled() => return Err(DownloadError::Cancelled),

                    () = tokio::time::sleep(self.config.chunk_delay) => {}
                }
            }
        }

        Ok(files)
    }

    async fn fetch_and_save(
        &self,
        chunk: &TextChunk,
        total: usize,
        language: &str,
        cancel: &CancellationToken,
    ) -> DownloadResult<PathBuf> {
        let number = chunk.number();
        let url = build_request_url(&self.config, &chunk.text, language);
        tracing::debug!(chunk = number, total, url = %url, "Requesting chunk");

        let response = tokio::select! {
            biased;

            () = cancel.cancelled() => return Err(DownloadError::Cancelled),

            result = self.fetcher.fetch(&url) => {
                result.map_err(|e| DownloadError::network(number, e.to_string()))?
            }
        };

        if !response.is_success() {
            return Err(DownloadError::status(number, response.status));
        }
        if response.is_markup() {
            return Err(DownloadError::error_page(number));
        }

        let file_name = chunk.file_name(total);
        let sink = Arc::clone(&self.sink);
        let body = response.body;
        let path = tokio::task::spawn_blocking(move || sink.save(&file_name, &body))
            .await
            .map_err(|e| DownloadError::save(number, e.to_string()))?
            .map_err(|e| DownloadError::save(number, e.to_string()))?;

        tracing::debug!(chunk = number, path = %path.display(), "Chunk saved");
        Ok(path)
    }

    fn set_last_error(&self, message: Option<String>) {
        *self
            .last_error
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = message;
    }

    fn emit(&self, event: DownloadEvent) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
