//! `speechbox download`

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use speechbox_core::domain::language_code;
use speechbox_core::{DownloadEvent, DownloadOutcome, Settings, SpeechPlatform};
use speechbox_download::{ChunkedDownloader, DownloadConfig};
use speechbox_voice::{SpeechSession, default_platform};

use crate::commands::DownloadArgs;
use crate::config::apply_download_overrides;
use crate::error::CliError;
use crate::input::read_text;
use crate::presentation::chunk_progress_bar;

pub async fn execute(settings: Settings, args: DownloadArgs) -> Result<()> {
    let text = read_text(&args.source)?;
    let settings = apply_download_overrides(settings, &args)?;
    let (lang, voice) = (args.lang.clone(), args.voice.clone());
    // Voice lookup may start the OS engine, which blocks.
    let language = tokio::task::spawn_blocking(move || {
        resolve_language(lang.as_deref(), voice.as_deref(), default_platform)
    })
    .await
    .context("Voice lookup failed")??;

    let config = DownloadConfig::from_settings(&settings);
    tracing::debug!(?config, "Download configuration");

    let (downloader, mut events) = ChunkedDownloader::from_config(config)
        .context("Failed to set up the HTTP client")?
        .with_events();

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let progress = tokio::spawn(async move {
        let mut bar = None;
        while let Some(event) = events.recv().await {
            match event {
                DownloadEvent::Started { total_chunks } => {
                    bar = Some(chunk_progress_bar(total_chunks as u64));
                }
                DownloadEvent::ChunkSaved { path, .. } => {
                    if let Some(pb) = &bar {
                        pb.set_message(path.display().to_string());
                        pb.inc(1);
                    }
                }
                DownloadEvent::Completed { .. } => {
                    if let Some(pb) = bar.take() {
                        pb.finish_with_message("done");
                    }
                }
                DownloadEvent::Failed { .. } => {
                    if let Some(pb) = bar.take() {
                        pb.abandon();
                    }
                }
            }
        }
    });

    let result = downloader
        .download_with_cancel(&text, &language, cancel)
        .await;
    drop(downloader);
    let _ = progress.await;

    match result.map_err(CliError::from)? {
        DownloadOutcome::Skipped => println!("Nothing to download."),
        DownloadOutcome::Completed { files } => {
            for file in &files {
                println!("{}", file.display());
            }
        }
    }
    Ok(())
}

/// `--lang` wins; otherwise the language of `--voice`, or of the platform's
/// default voice; English when there are no voices at all.
///
/// The platform is only created when a voice has to be consulted.
fn resolve_language(
    lang: Option<&str>,
    voice: Option<&str>,
    platform: impl FnOnce() -> Arc<dyn SpeechPlatform>,
) -> Result<String> {
    if let Some(lang) = lang {
        let lang = lang.trim();
        if lang.is_empty() {
            return Err(CliError::Arguments("--lang cannot be empty".to_string()).into());
        }
        return Ok(lang.to_string());
    }

    let (session, _events) = SpeechSession::new(platform());
    let voice = match voice {
        Some(query) => Some(session.find_voice(query).ok_or_else(|| {
            CliError::Arguments(format!("no voice matches '{query}' (see `speechbox voices`)"))
        })?),
        None => session.default_voice(),
    };
    Ok(language_code(voice.as_ref()).to_string())
}
