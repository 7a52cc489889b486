//! `speechbox config`

use anyhow::{Context, Result};

use speechbox_core::Settings;

/// Print `settings` (or the defaults) as pretty JSON.
pub fn execute(settings: &Settings, defaults: bool) -> Result<()> {
    let shown = if defaults {
        Settings::with_defaults()
    } else {
        settings.clone()
    };
    println!("{}", render(&shown)?);
    Ok(())
}

fn render(settings: &Settings) -> Result<String> {
    serde_json::to_string_pretty(settings).context("Failed to serialize settings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_round_trips() {
        let settings = Settings::with_defaults();
        let json = render(&settings).unwrap();
        assert!(json.contains("\"chunk_size\": 200"));
        let parsed: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, settings);
    }
}
