use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use voicenav::config::Config;

mod cli;

#[derive(Parser)]
#[command(name = "voicenav")]
#[command(about = "Voice command navigation - spoken commands in, spoken feedback out")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to <config dir>/voicenav/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Language code to use instead of the configured one (e.g. "es")
    #[arg(short, long, global = true)]
    language: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Navigate a demo app by typing what you would say
    Listen,

    /// List the voice commands available in the active language
    Commands,

    /// List supported languages
    Languages,

    /// Initialize a new config.toml configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let language = cli.language.as_deref();

    match cli.command {
        Some(Commands::Init { force }) => {
            cli::init::init_command(cli.config, force)?;
        }
        Some(Commands::Commands) => {
            let config = Config::load(cli.config.as_deref())?;
            cli::commands::commands_command(&config, language)?;
        }
        Some(Commands::Languages) => {
            let config = Config::load(cli.config.as_deref())?;
            cli::languages::languages_command(&config, language)?;
        }
        Some(Commands::Listen) | None => {
            // Default: interactive session
            let config = Config::load(cli.config.as_deref())?;
            cli::listen::listen_command(&config, language).await?;
        }
    }

    Ok(())
}
