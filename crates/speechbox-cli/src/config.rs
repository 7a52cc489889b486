//! Settings resolution: defaults, then the JSON file, then command-line
//! overrides.

use std::path::Path;

use speechbox_core::{Settings, SettingsUpdate, validate_settings};

use crate::commands::DownloadArgs;
use crate::error::CliError;

/// Load effective settings, optionally layering a JSON file over the
/// defaults. The result is validated.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, CliError> {
    let mut settings = Settings::with_defaults();

    if let Some(path) = path {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            CliError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        let file: Settings = serde_json::from_str(&raw).map_err(|e| {
            CliError::Config(format!("invalid settings in {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "Loaded settings file");
        settings.merge(&present_fields(&file));
    }

    validate_settings(&settings)?;
    Ok(settings)
}

/// Apply download flags on top of `settings` and re-validate.
pub fn apply_download_overrides(
    mut settings: Settings,
    args: &DownloadArgs,
) -> Result<Settings, CliError> {
    let relay_url = if args.no_relay {
        Some(Some(String::new()))
    } else {
        args.relay_url.clone().map(Some)
    };

    settings.merge(&SettingsUpdate {
        chunk_size: args.chunk_size.map(Some),
        chunk_delay_ms: args.delay_ms.map(Some),
        relay_url,
        output_dir: args.out.clone().map(Some),
        ..SettingsUpdate::default()
    });

    validate_settings(&settings)?;
    Ok(settings)
}

/// An update that sets exactly the fields present in `file`.
fn present_fields(file: &Settings) -> SettingsUpdate {
    SettingsUpdate {
        chunk_size: file.chunk_size.map(Some),
        chunk_delay_ms: file.chunk_delay_ms.map(Some),
        synthesis_url: file.synthesis_url.clone().map(Some),
        client_id: file.client_id.clone().map(Some),
        relay_url: file.relay_url.clone().map(Some),
        output_dir: file.output_dir.clone().map(Some),
        request_timeout_secs: file.request_timeout_secs.map(Some),
    }
}
