//! `speechbox speak`
//!
//! Speaks once and waits for the session to return to Idle. Ctrl-C cancels
//! the utterance.

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use speechbox_core::{SpeakingState, SpeechRequest};
use speechbox_voice::{SessionEvent, SpeakOutcome, SpeechSession, default_platform};

use crate::commands::SpeakArgs;
use crate::error::CliError;
use crate::input::read_text;

pub async fn execute(args: SpeakArgs) -> Result<()> {
    let text = read_text(&args.source)?;

    // Engine start-up and dispatch wait on the engine thread.
    let (session, mut events, outcome) =
        tokio::task::spawn_blocking(move || start_speaking(text, &args))
            .await
            .context("Speech task failed")??;

    match outcome {
        SpeakOutcome::Dispatched(id) => tracing::debug!(%id, "Waiting for playback"),
        SpeakOutcome::EmptyText => {
            println!("Nothing to say.");
            return Ok(());
        }
        SpeakOutcome::Unsupported => {
            return Err(CliError::Speech(
                "Speech synthesis is not supported on this system.".to_string(),
            )
            .into());
        }
        SpeakOutcome::Busy => {
            return Err(CliError::Speech("The speech engine is busy.".to_string()).into());
        }
    }

    if !session.reports_completion() {
        eprintln!(
            "Note: this speech engine cannot report when playback ends; \
             speechbox may exit before the audio finishes."
        );
    }

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                session.cancel();
                return Err(CliError::Interrupted.into());
            }
            event = events.recv() => match event {
                Some(SessionEvent::StateChanged(SpeakingState::Idle)) | None => break,
                Some(_) => {}
            },
        }
    }

    Ok(())
}

fn start_speaking(
    text: String,
    args: &SpeakArgs,
) -> Result<(SpeechSession, mpsc::UnboundedReceiver<SessionEvent>, SpeakOutcome)> {
    let (session, events) = SpeechSession::new(default_platform());

    let voice = match args.voice.as_deref() {
        Some(query) => Some(session.find_voice(query).ok_or_else(|| {
            CliError::Arguments(format!("no voice matches '{query}' (see `speechbox voices`)"))
        })?),
        None => session.default_voice(),
    };

    let request = SpeechRequest::new(text)
        .with_voice(voice)
        .with_rate(args.rate)
        .with_pitch(args.pitch)
        .with_volume(args.volume);

    let outcome = session.speak(request);
    Ok((session, events, outcome))
}
