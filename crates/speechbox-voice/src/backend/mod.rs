//! Speech platform implementations.
//!
//! The [`SpeechSession`](crate::session::SpeechSession) talks to the host
//! engine only through [`SpeechPlatform`], so a backend is chosen once at
//! startup and handed over as `Arc<dyn SpeechPlatform>`.
//!
//! ## Backend implementations
//!
//! | Feature  | Type                     | Supported |
//! |----------|--------------------------|-----------|
//! | (none)   | [`NullSpeechPlatform`]   |     ✗     |
//! | `native` | `NativeSpeechPlatform`   |     ✓     |

#[cfg_attr(not(feature = "native"), allow(dead_code))]
mod catalog;
mod listeners;
#[cfg(feature = "native")]
pub mod native;
mod null;
#[cfg_attr(not(feature = "native"), allow(dead_code))]
pub(crate) mod prosody;

use std::sync::Arc;

use speechbox_core::SpeechPlatform;

pub use listeners::VoicesChangedRegistry;
#[cfg(feature = "native")]
pub use native::NativeSpeechPlatform;
pub use null::NullSpeechPlatform;

/// Pick the best speech platform available in this build.
///
/// With the `native` feature this starts the OS engine; if that fails,
/// or the feature is off, the returned platform reports itself unsupported.
pub fn default_platform() -> Arc<dyn SpeechPlatform> {
    #[cfg(feature = "native")]
    {
        match NativeSpeechPlatform::spawn() {
            Ok(platform) => return Arc::new(platform),
            Err(e) => tracing::warn!(error = %e, "Native speech engine unavailable"),
        }
    }

    #[cfg(not(feature = "native"))]
    tracing::debug!("Built without the `native` feature; live speech disabled");

    Arc::new(NullSpeechPlatform)
}
