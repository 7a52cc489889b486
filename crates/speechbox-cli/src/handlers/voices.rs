//! `speechbox voices`

use anyhow::Result;

use speechbox_voice::{SpeechSession, default_platform};

use crate::error::CliError;
use crate::presentation::voice_table;

pub fn execute() -> Result<()> {
    let (session, _events) = SpeechSession::new(default_platform());

    if !session.is_supported() {
        return Err(CliError::Speech(
            "Speech synthesis is not supported on this system. \
             Rebuild with `--features native` to use the OS speech engine."
                .to_string(),
        )
        .into());
    }

    let voices = session.voices();
    if voices.is_empty() {
        println!("No voices available.");
        return Ok(());
    }

    let default = session.default_voice();
    print!("{}", voice_table(&voices, default.as_ref().map(|v| v.id.as_str())));
    println!("\n{} voice(s); * marks the default.", voices.len());
    Ok(())
}
