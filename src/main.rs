use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "longclick-options")]
#[command(about = "Drive the long-click options page against a settings store")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.longclick/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON store (overrides the config)
    #[arg(short, long, global = true)]
    store: Option<PathBuf>,

    /// Print the page state as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the page and show the control states
    Show,

    /// Click the long-click checkbox
    Toggle,

    /// Type a value into the hold time field
    HoldTime {
        /// Text to type (persisted only if it is an integer >= the minimum)
        value: String,
    },

    /// Remove both settings from the store
    Reset,

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
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

    let config_path = cli
        .config
        .unwrap_or_else(longclick_options::OptionsConfig::default_config_path);
    let target = cli::Target {
        config_path,
        store_override: cli.store,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::Show) | None => cli::options::show_command(&target)?,
        Some(Commands::Toggle) => cli::options::toggle_command(&target)?,
        Some(Commands::HoldTime { value }) => cli::options::hold_time_command(&target, &value)?,
        Some(Commands::Reset) => cli::reset::reset_command(&target)?,
        Some(Commands::Init { force }) => cli::init::init_command(&target, force)?,
    }

    Ok(())
}
