//! themewind CLI - utility CSS configuration from theme stylesheets.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use themewind_config::{BuildMode, SETTINGS_FILE};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod watcher;

#[derive(Parser)]
#[command(name = "themewind")]
#[command(about = "Generate utility CSS engine configuration from theme stylesheets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to themewind.toml settings file
    #[arg(short, long, default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default themewind.toml
    Init {
        /// Overwrite an existing settings file
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate the engine configuration as JSON
    Build {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Build mode (defaults to NODE_ENV)
        #[arg(short, long)]
        mode: Option<BuildMode>,

        /// Emit compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List custom properties extracted from the theme stylesheets
    Vars {
        /// Show the derived color palette instead
        #[arg(long)]
        colors: bool,
    },

    /// Rebuild the configuration whenever a theme stylesheet changes
    Watch {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Build mode (defaults to NODE_ENV)
        #[arg(short, long)]
        mode: Option<BuildMode>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. stdout is reserved for generated output.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Build {
            output,
            mode,
            compact,
        } => {
            let mode = mode.unwrap_or_else(BuildMode::from_env);
            commands::build::run(&cli.config, output, mode, !compact)?;
        }
        Commands::Vars { colors } => {
            commands::vars::run(&cli.config, colors)?;
        }
        Commands::Watch { output, mode } => {
            let mode = mode.unwrap_or_else(BuildMode::from_env);
            commands::watch::run(&cli.config, output, mode).await?;
        }
    }

    Ok(())
}
