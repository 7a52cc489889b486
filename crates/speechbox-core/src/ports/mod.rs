//! Port definitions (trait abstractions) for external systems.
//!
//! Ports describe what speechbox needs from the outside world without saying
//! how it is provided. Adapter crates implement them:
//!
//! | Port             | Implementations                                        |
//! |------------------|--------------------------------------------------------|
//! | `SpeechPlatform` | `speechbox-voice`: native OS engine, null platform     |
//! | `AudioFetcher`   | `speechbox-download`: reqwest backend                  |
//! | `AudioSink`      | `speechbox-download`: directory sink                   |

mod audio_fetcher;
mod audio_sink;
mod speech_platform;

pub use audio_fetcher::{AudioFetcher, FetchError, FetchedAudio};
pub use audio_sink::{AudioSink, SaveError};
pub use speech_platform::{
    PlatformError, SpeechPlatform, SubscriptionId, UtteranceCallback, UtteranceEvent,
    UtteranceNotifier, VoicesChangedListener,
};
