//! Native OS speech engine via the [`tts`] crate.
//!
//! `tts::Tts` is `!Send` on some platforms (AVFoundation on macOS), so the
//! engine lives on a dedicated OS thread and [`NativeSpeechPlatform`] is a
//! `Send + Sync` proxy that routes every call through an [`EngineCommand`].
//!
//! Completion is detected by polling `is_speaking` from the engine thread.
//! Engines that cannot report it are treated as finishing immediately after
//! dispatch, so the session never gets stuck in Speaking; see
//! [`SpeechPlatform::reports_completion`].
//!
//! The OS engines have no voices-changed signal. The engine thread re-reads
//! its voice list every [`VOICE_REFRESH_INTERVAL`] into a [`VoiceCatalog`],
//! which notifies subscribers when the list differs. `voices()` reads the
//! catalog and never waits on the engine.
//!
//! Blocking: `spawn` waits for engine start-up and `speak_utterance` waits
//! for the engine to accept the utterance. Async callers should make those
//! calls from `spawn_blocking`.

use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use speechbox_core::domain::{PITCH_RANGE, RATE_RANGE};
use speechbox_core::{
    PlatformError, SpeechPlatform, SubscriptionId, Utterance, UtteranceNotifier,
    VoicesChangedListener, Voice,
};
use tts::{Features, Tts};

use super::catalog::VoiceCatalog;
use super::prosody::{scale_around_normal, scale_linear};

/// How often the engine thread checks whether playback finished.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Time an engine may take to start audio before "not speaking" means done.
const STARTUP_GRACE: Duration = Duration::from_millis(750);

/// How often the engine thread re-reads the OS voice list.
pub const VOICE_REFRESH_INTERVAL: Duration = Duration::from_secs(5);

// ── Commands ───────────────────────────────────────────────────────

enum EngineCommand {
    Speak {
        utterance: Utterance,
        notifier: UtteranceNotifier,
        reply: mpsc::Sender<Result<(), PlatformError>>,
    },
    Cancel,
    Shutdown,
}

/// What the engine thread reports once the OS engine is up.
struct EngineInfo {
    reports_completion: bool,
}

// ── Handle (Send + Sync proxy) ─────────────────────────────────────

/// [`SpeechPlatform`] backed by the operating system's speech engine.
pub struct NativeSpeechPlatform {
    cmd_tx: mpsc::Sender<EngineCommand>,
    thread: Option<thread::JoinHandle<()>>,
    catalog: Arc<VoiceCatalog>,
    reports_completion: bool,
}

impl NativeSpeechPlatform {
    /// Start the engine thread and initialize the OS engine on it.
    ///
    /// Returns once the engine is ready and its voice list has been read.
    pub fn spawn() -> Result<Self, PlatformError> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<EngineInfo, PlatformError>>();
        let catalog = Arc::new(VoiceCatalog::new());

        let thread = {
            let catalog = Arc::clone(&catalog);
            thread::Builder::new()
                .name("speechbox-tts".into())
                .spawn(move || run(&cmd_rx, &init_tx, &catalog))
                .map_err(|e| PlatformError::Engine(format!("failed to spawn engine thread: {e}")))?
        };

        let info = init_rx
            .recv()
            .map_err(|_| PlatformError::Engine("engine thread exited during startup".into()))??;

        Ok(Self {
            cmd_tx,
            thread: Some(thread),
            catalog,
            reports_completion: info.reports_completion,
        })
    }
}

impl SpeechPlatform for NativeSpeechPlatform {
    fn is_supported(&self) -> bool {
        true
    }

    fn reports_completion(&self) -> bool {
        self.reports_completion
    }

    fn voices(&self) -> Vec<Voice> {
        self.catalog.voices()
    }

    fn speak_utterance(
        &self,
        utterance: Utterance,
        notifier: UtteranceNotifier,
    ) -> Result<(), PlatformError> {
        let (reply, rx) = mpsc::channel();
        self.cmd_tx
            .send(EngineCommand::Speak {
                utterance,
                notifier,
                reply,
            })
            .map_err(|_| PlatformError::Engine("engine thread stopped".into()))?;
        rx.recv()
            .map_err(|_| PlatformError::Engine("engine thread stopped".into()))?
    }

    fn cancel_speech(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Cancel);
    }

    fn subscribe_voices_changed(&self, listener: VoicesChangedListener) -> SubscriptionId {
        self.catalog.subscribe(listener)
    }

    fn unsubscribe_voices_changed(&self, id: SubscriptionId) {
        self.catalog.unsubscribe(id);
    }
}

impl Drop for NativeSpeechPlatform {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

// ── Engine thread ──────────────────────────────────────────────────

/// Utterance currently playing on the engine thread.
struct Playing {
    notifier: UtteranceNotifier,
    dispatched_at: Instant,
    seen_speaking: bool,
}

enum Progress {
    Playing,
    Ended,
    Failed(String),
}

struct Engine {
    tts: Tts,
    features: Features,
}

fn run(
    cmd_rx: &mpsc::Receiver<EngineCommand>,
    init_tx: &mpsc::Sender<Result<EngineInfo, PlatformError>>,
    catalog: &VoiceCatalog,
) {
    let mut engine = match Tts::default() {
        Ok(tts) => {
            let features = tts.supported_features();
            tracing::debug!(?features, "Native speech engine ready");
            Engine { tts, features }
        }
        Err(e) => {
            let _ = init_tx.send(Err(PlatformError::Engine(e.to_string())));
            return;
        }
    };

    catalog.replace(engine.voices());
    let _ = init_tx.send(Ok(EngineInfo {
        reports_completion: engine.features.is_speaking,
    }));

    let mut playing: Option<Playing> = None;
    let mut next_voice_refresh = Instant::now() + VOICE_REFRESH_INTERVAL;

    loop {
        let until_refresh = next_voice_refresh.saturating_duration_since(Instant::now());
        let timeout = if playing.is_some() {
            until_refresh.min(POLL_INTERVAL)
        } else {
            until_refresh
        };

        let command = match cmd_rx.recv_timeout(timeout) {
            Ok(cmd) => Some(cmd),
            Err(mpsc::RecvTimeoutError::Timeout) => None,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        };

        match command {
            Some(EngineCommand::Speak {
                utterance,
                notifier,
                reply,
            }) => {
                // A replaced utterance was already cancelled by its owner.
                playing = None;
                match engine.speak(&utterance) {
                    Ok(()) => {
                        let _ = reply.send(Ok(()));
                        playing = Some(Playing {
                            notifier,
                            dispatched_at: Instant::now(),
                            seen_speaking: false,
                        });
                    }
                    Err(e) => {
                        let _ = reply.send(Err(e));
                    }
                }
            }
            Some(EngineCommand::Cancel) => {
                engine.stop();
                playing = None;
            }
            Some(EngineCommand::Shutdown) => {
                engine.stop();
                break;
            }
            None => {}
        }

        if let Some(current) = playing.as_mut() {
            match engine.poll(current) {
                Progress::Playing => {}
                Progress::Ended => {
                    current.notifier.ended();
                    playing = None;
                }
                Progress::Failed(reason) => {
                    current.notifier.failed(reason);
                    playing = None;
                }
            }
        }

        if Instant::now() >= next_voice_refresh {
            if catalog.replace(engine.voices()) {
                tracing::debug!("Native voice list changed");
            }
            next_voice_refresh = Instant::now() + VOICE_REFRESH_INTERVAL;
        }
    }

    tracing::debug!("Native speech engine thread exiting");
}

impl Engine {
    fn voices(&self) -> Vec<Voice> {
        let default_id = if self.features.get_voice {
            self.tts.voice().ok().flatten().map(|v| v.id())
        } else {
            None
        };

        match self.tts.voices() {
            Ok(voices) => voices
                .into_iter()
                .map(|v| {
                    let id = v.id();
                    let is_default = default_id.as_deref() == Some(id.as_str());
                    Voice::new(id, v.name(), v.language().to_string()).with_default(is_default)
                })
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to enumerate native voices");
                Vec::new()
            }
        }
    }

    fn speak(&mut self, utterance: &Utterance) -> Result<(), PlatformError> {
        self.apply_voice(utterance);
        self.apply_prosody(utterance);

        self.tts
            .speak(utterance.text.as_str(), true)
            .map(|_| ())
            .map_err(|e| PlatformError::Engine(e.to_string()))
    }

    fn apply_voice(&mut self, utterance: &Utterance) {
        let Some(wanted) = utterance.voice.as_ref() else {
            return;
        };
        if !self.features.voice {
            return;
        }
        let found = self
            .tts
            .voices()
            .ok()
            .and_then(|voices| voices.into_iter().find(|v| v.id() == wanted.id));
        match found {
            Some(voice) => {
                if let Err(e) = self.tts.set_voice(&voice) {
                    tracing::warn!(voice = %wanted.id, error = %e, "Could not select voice");
                }
            }
            None => tracing::warn!(voice = %wanted.id, "Voice no longer offered by engine"),
        }
    }

    fn apply_prosody(&mut self, utterance: &Utterance) {
        if self.features.rate {
            let rate = scale_around_normal(
                utterance.rate,
                &RATE_RANGE,
                self.tts.min_rate(),
                self.tts.normal_rate(),
                self.tts.max_rate(),
            );
            if let Err(e) = self.tts.set_rate(rate) {
                tracing::debug!(error = %e, "Engine rejected rate");
            }
        }
        if self.features.pitch {
            let pitch = scale_around_normal(
                utterance.pitch,
                &PITCH_RANGE,
                self.tts.min_pitch(),
                self.tts.normal_pitch(),
                self.tts.max_pitch(),
            );
            if let Err(e) = self.tts.set_pitch(pitch) {
                tracing::debug!(error = %e, "Engine rejected pitch");
            }
        }
        if self.features.volume {
            let volume =
                scale_linear(utterance.volume, self.tts.min_volume(), self.tts.max_volume());
            if let Err(e) = self.tts.set_volume(volume) {
                tracing::debug!(error = %e, "Engine rejected volume");
            }
        }
    }

    fn stop(&mut self) {
        if self.features.stop
            && let Err(e) = self.tts.stop()
        {
            tracing::debug!(error = %e, "Engine stop failed");
        }
    }

    /// Check on the current utterance. Reports `started` the first time the
    /// engine is seen speaking.
    fn poll(&self, current: &mut Playing) -> Progress {
        if !self.features.is_speaking {
            current.notifier.started();
            return Progress::Ended;
        }

        let speaking = match self.tts.is_speaking() {
            Ok(speaking) => speaking,
            Err(e) => return Progress::Failed(e.to_string()),
        };

        if speaking {
            if !current.seen_speaking {
                current.seen_speaking = true;
                current.notifier.started();
            }
            Progress::Playing
        } else if current.seen_speaking || current.dispatched_at.elapsed() >= STARTUP_GRACE {
            Progress::Ended
        } else {
            Progress::Playing
        }
    }
}
