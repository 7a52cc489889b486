//! Main commands enum and subcommand arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the voices offered by the local speech engine
    Voices,

    /// Speak text aloud with the local speech engine
    Speak(SpeakArgs),

    /// Save text as MP3 files fetched from the synthesis service
    Download(DownloadArgs),

    /// Print the effective settings as JSON
    Config {
        /// Print the built-in defaults instead
        #[arg(long)]
        defaults: bool,
    },
}

/// Where the text comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct TextSource {
    /// Text to use (reads stdin when omitted and stdin is piped)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SpeakArgs {
    #[command(flatten)]
    pub source: TextSource,

    /// Voice id or name (defaults to the engine's default voice)
    #[arg(long, env = "SPEECHBOX_VOICE")]
    pub voice: Option<String>,

    /// Speaking rate, 1.0 = normal
    #[arg(long, default_value_t = 1.0)]
    pub rate: f32,

    /// Pitch, 1.0 = normal
    #[arg(long, default_value_t = 1.0)]
    pub pitch: f32,

    /// Volume from 0.0 to 1.0
    #[arg(long, default_value_t = 1.0)]
    pub volume: f32,
}

#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub source: TextSource,

    /// Voice id or name; its language selects the synthesis language
    #[arg(long, env = "SPEECHBOX_VOICE", conflicts_with = "lang")]
    pub voice: Option<String>,

    /// Language code for synthesis (e.g. "en", "fr")
    #[arg(long)]
    pub lang: Option<String>,

    /// Directory to save files into
    #[arg(short, long, env = "SPEECHBOX_OUTPUT_DIR")]
    pub out: Option<String>,

    /// Request the synthesis endpoint directly instead of through the relay
    #[arg(long)]
    pub no_relay: bool,

    /// Relay URL to route requests through
    #[arg(long, env = "SPEECHBOX_RELAY_URL", conflicts_with = "no_relay")]
    pub relay_url: Option<String>,

    /// Maximum characters per request
    #[arg(long, env = "SPEECHBOX_CHUNK_SIZE")]
    pub chunk_size: Option<usize>,

    /// Pause between requests in milliseconds
    #[arg(long, env = "SPEECHBOX_CHUNK_DELAY_MS")]
    pub delay_ms: Option<u64>,
}
