//! TermPipe CLI - surgical line-level file editing for agents.
//!
//! Exposes the editing tools for one-shot calls (`call`), a JSON-lines
//! session over stdio (`session`), and configuration inspection.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use termpipe_tools::ToolRegistry;
use tracing::warn;

mod commands;
mod config_bridge;
mod theme;

use commands::{call, config, session, tools};

/// TermPipe - surgical text editing tools
#[derive(Parser)]
#[command(name = "termpipe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Workspace root for relative paths (defaults to the current directory)
    #[arg(short, long, global = true)]
    workspace: Option<PathBuf>,

    /// Never ask the model to explain failures
    #[arg(long, global = true)]
    no_explain: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available tools
    Tools {
        /// Print full definitions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a single tool
    Call {
        /// Tool name (see `termpipe tools`)
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },

    /// Serve JSON-lines tool requests on stdin
    Session,

    /// View and validate configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Output format (toml or json)
        #[arg(short, long, default_value = "toml")]
        format: String,
        /// Show only a specific section (e.g. editor, explain, logging)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Validate the current configuration
    Validate,
    /// Show config file paths being checked
    Paths,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let workspace = match cli.workspace {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    let loaded = termpipe_config::Config::load(Some(&workspace));

    // Set up logging from config, with --verbose override.
    let log_config = if let Ok(resolved) = &loaded {
        let mut lc = config_bridge::to_log_config(&resolved.config);
        if cli.verbose {
            "debug".clone_into(&mut lc.level);
        }
        lc
    } else {
        let level = if cli.verbose { "debug" } else { "warn" };
        termpipe_telemetry::LogConfig::new(level)
            .with_format(termpipe_telemetry::LogFormat::Compact)
    };
    if let Err(e) = termpipe_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let cfg = match loaded {
        Ok(resolved) => resolved.config,
        Err(e) => {
            warn!(error = %e, "config load failed, using defaults");
            termpipe_config::Config::default()
        },
    };

    let registry = ToolRegistry::with_defaults();

    match cli.command {
        Commands::Tools { json } => tools::list_tools(&registry, json)?,
        Commands::Call { tool, args } => {
            let ctx = config_bridge::build_context(&cfg, workspace, cli.no_explain)?;
            call::call_tool(&registry, &ctx, &tool, &args).await?;
        },
        Commands::Session => {
            let ctx = config_bridge::build_context(&cfg, workspace, cli.no_explain)?;
            session::run_stdio(&registry, &ctx).await?;
        },
        Commands::Config { command } => match command {
            ConfigCommands::Show { format, section } => {
                config::show_config(&workspace, &format, section.as_deref())?;
            },
            ConfigCommands::Validate => config::validate_config(&workspace)?,
            ConfigCommands::Paths => config::show_paths(&workspace),
        },
    }

    Ok(())
}
