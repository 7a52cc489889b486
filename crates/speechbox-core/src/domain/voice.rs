//! Voices offered by the host speech platform.

use serde::{Deserialize, Serialize};

/// Language code used when no voice is selected.
pub const DEFAULT_LANGUAGE_CODE: &str = "en";

/// A named, language-tagged synthetic voice.
///
/// Voices are owned by the platform; speechbox only enumerates them and
/// passes them back when speaking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    /// Platform identifier, stable for the lifetime of the process.
    pub id: String,

    /// Human-readable display name.
    pub name: String,

    /// BCP 47 language tag (e.g., `"en-US"`).
    pub lang: String,

    /// Whether the platform marks this voice as its default.
    #[serde(default)]
    pub is_default: bool,
}

impl Voice {
    /// Create a non-default voice.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lang: lang.into(),
            is_default: false,
        }
    }

    /// Mark this voice as the platform default.
    #[must_use]
    pub const fn with_default(mut self, is_default: bool) -> Self {
        self.is_default = is_default;
        self
    }

    /// Primary language subtag: the part of the tag before the first `-`.
    pub fn language_code(&self) -> &str {
        match self.lang.split('-').next().map(str::trim) {
            Some(code) if !code.is_empty() => code,
            _ => DEFAULT_LANGUAGE_CODE,
        }
    }
}

/// Two-letter language code for the remote synthesis endpoint.
pub fn language_code(voice: Option<&Voice>) -> &str {
    voice.map_or(DEFAULT_LANGUAGE_CODE, Voice::language_code)
}

/// Pick the voice to preselect: the platform default, else the first voice.
pub fn select_default_voice(voices: &[Voice]) -> Option<&Voice> {
    voices.iter().find(|v| v.is_default).or_else(|| voices.first())
}

/// Find a voice by exact id, then by case-insensitive name.
pub fn find_voice<'a>(voices: &'a [Voice], query: &str) -> Option<&'a Voice> {
    let query = query.trim();
    voices
        .iter()
        .find(|v| v.id == query)
        .or_else(|| voices.iter().find(|v| v.name.eq_ignore_ascii_case(query)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<Voice> {
        vec![
            Voice::new("v1", "Alice", "en-US"),
            Voice::new("v2", "Bruno", "pt-BR").with_default(true),
            Voice::new("v3", "Chloé", "fr"),
        ]
    }

    #[test]
    fn language_code_takes_primary_subtag() {
        assert_eq!(Voice::new("a", "A", "en-GB").language_code(), "en");
        assert_eq!(Voice::new("a", "A", "fr").language_code(), "fr");
        assert_eq!(Voice::new("a", "A", "zh-Hant-TW").language_code(), "zh");
    }

    #[test]
    fn language_code_falls_back_to_english() {
        assert_eq!(language_code(None), "en");
        assert_eq!(language_code(Some(&Voice::new("a", "A", ""))), "en");
    }

    #[test]
    fn default_selection_prefers_marked_voice() {
        let voices = catalog();
        assert_eq!(select_default_voice(&voices).map(|v| v.id.as_str()), Some("v2"));
    }

    #[test]
    fn default_selection_falls_back_to_first() {
        let voices: Vec<Voice> = catalog()
            .into_iter()
            .map(|v| v.with_default(false))
            .collect();
        assert_eq!(select_default_voice(&voices).map(|v| v.id.as_str()), Some("v1"));
        assert!(select_default_voice(&[]).is_none());
    }

    #[test]
    fn find_voice_matches_id_then_name() {
        let voices = catalog();
        assert_eq!(find_voice(&voices, "v3").map(|v| v.name.as_str()), Some("Chloé"));
        assert_eq!(find_voice(&voices, "alice").map(|v| v.id.as_str()), Some("v1"));
        assert!(find_voice(&voices, "nobody").is_none());
    }

    #[test]
    fn voice_serializes_camel_case() {
        let json = serde_json::to_string(&Voice::new("v1", "Alice", "en-US").with_default(true))
            .unwrap();
        assert!(json.contains("\"isDefault\":true"));
    }
}
