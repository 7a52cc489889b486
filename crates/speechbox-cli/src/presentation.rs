//! Terminal formatting.

use indicatif::{ProgressBar, ProgressStyle};
use speechbox_core::Voice;

/// Render voices as an aligned table. `default_id` gets a `*` marker.
pub fn voice_table(voices: &[Voice], default_id: Option<&str>) -> String {
    let name_width = voices
        .iter()
        .map(|v| v.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());
    let lang_width = voices
        .iter()
        .map(|v| v.lang.chars().count())
        .max()
        .unwrap_or(0)
        .max("LANG".len());

    let mut out = format!("  {:<name_width$}  {:<lang_width$}  ID\n", "NAME", "LANG");
    for voice in voices {
        let marker = if Some(voice.id.as_str()) == default_id {
            '*'
        } else {
            ' '
        };
        out.push_str(&format!(
            "{marker} {:<name_width$}  {:<lang_width$}  {}\n",
            voice.name, voice.lang, voice.id
        ));
    }
    out
}

/// Progress bar counting saved chunks.
pub fn chunk_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks {msg}")
        .map_or_else(|_| ProgressStyle::default_bar(), |s| s.progress_chars("█▓░"));
    pb.set_style(style);
    pb
}
