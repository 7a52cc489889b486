//! CLI entry point.
//!
//! Wires logging, environment and settings, then dispatches to handlers.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use speechbox_cli::{Cli, CliError, Commands, handlers, load_settings};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let settings = load_settings(cli.config.as_deref())?;

    match command {
        Commands::Voices => tokio::task::spawn_blocking(handlers::voices::execute).await?,
        Commands::Speak(args) => handlers::speak::execute(args).await,
        Commands::Download(args) => handlers::download::execute(settings, args).await,
        Commands::Config { defaults } => handlers::config::execute(&settings, defaults),
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads SPEECHBOX_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        eprintln!("Error: {err:#}");
        std::process::exit(code);
    }
}
