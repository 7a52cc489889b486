//! URL construction for the synthesis endpoint and the relay.
//!
//! Pure functions; every user-supplied component is percent-encoded.

use crate::config::DownloadConfig;

/// Build the synthesis URL for one chunk of text.
///
/// `{synthesis_url}?ie=UTF-8&client={client_id}&q={text}&tl={language}`
pub fn build_synthesis_url(config: &DownloadConfig, text: &str, language: &str) -> String {
    format!(
        "{}?ie=UTF-8&client={}&q={}&tl={}",
        config.synthesis_url,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(text),
        urlencoding::encode(language),
    )
}

/// Route `target` through a relay: `{relay_url}?{encoded target}`.
pub fn wrap_with_relay(relay_url: &str, target: &str) -> String {
    format!("{relay_url}?{}", urlencoding::encode(target))
}

/// The URL actually requested for a chunk: the synthesis URL, relayed when a
/// relay is configured.
pub fn build_request_url(config: &DownloadConfig, text: &str, language: &str) -> String {
    let target = build_synthesis_url(config, text, language);
    match config.relay_url.as_deref() {
        Some(relay) => wrap_with_relay(relay, &target),
        None => target,
    }
}
