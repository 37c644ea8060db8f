//! CLI module for carteira
//!
//! Command-line interface over the portfolio dashboard client. Uses clap
//! for argument parsing and a structured command pattern: each subcommand
//! lives in its own file with a dedicated Args struct and Command wrapper.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod args;
pub mod commands;

pub use args::{parse_date, parse_decimal};

use crate::config::{Settings, DEFAULT_API_URL};
use crate::data_paths::{DataPaths, DEFAULT_DATA_DIR};
use crate::logging::{init_logging, LogMode, LoggingConfig};
use crate::portfolio::display::DisplayOptions;

use commands::add::{AddArgs, AddCommand};
use commands::create::{CreateArgs, CreateCommand};
use commands::list::{ListArgs, ListCommand};
use commands::quote::{QuoteArgs, QuoteCommand};
use commands::show::{ShowArgs, ShowCommand};
use commands::suggest::{SuggestArgs, SuggestCommand};
use commands::version::{VersionArgs, VersionCommand};
use commands::watch::{WatchArgs, WatchCommand};

#[derive(Parser)]
#[command(name = "carteira")]
#[command(version)]
#[command(about = "Dashboard de carteiras de investimento", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API base URL (falls back to CARTEIRA_API_URL, then localhost:8000)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Data directory path (default: ./data)
    #[arg(long, global = true, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Disable colored output and escape codes
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List carteiras with current valuations
    List(ListArgs),

    /// Show one carteira's holdings and composition
    Show(ShowArgs),

    /// Create a new carteira
    Create(CreateArgs),

    /// Add an asset to a carteira
    Add(AddArgs),

    /// Fetch the current price for a symbol
    Quote(QuoteArgs),

    /// Autocomplete stock symbols
    Suggest(SuggestArgs),

    /// Live dashboard with periodic price refresh
    Watch(WatchArgs),

    /// Show version information
    Version(VersionArgs),
}

impl Cli {
    /// Resolve settings from flags and environment
    pub fn settings(&self) -> Settings {
        let api_url = self
            .api_url
            .clone()
            .or_else(|| std::env::var("CARTEIRA_API_URL").ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Settings::new(api_url)
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let data_paths = DataPaths::new(&self.data_dir);
        data_paths.ensure_directories()?;

        // -v bumps the default filter; an explicit RUST_LOG still wins
        if self.verbose > 0 && std::env::var("RUST_LOG").is_err() {
            let level = if self.verbose == 1 { "debug" } else { "trace" };
            std::env::set_var("RUST_LOG", level);
        }

        // The watch view owns the terminal, so its logs go to file only
        let mode = match self.command {
            Commands::Watch(_) => LogMode::FileOnly,
            _ => LogMode::ConsoleAndFile,
        };
        init_logging(LoggingConfig::new(mode, data_paths))?;

        let settings = self.settings();
        let display = if self.no_color {
            DisplayOptions::plain()
        } else {
            DisplayOptions::default()
        };

        match self.command {
            Commands::List(args) => ListCommand::new(args).execute(&settings, display).await,
            Commands::Show(args) => ShowCommand::new(args).execute(&settings, display).await,
            Commands::Create(args) => CreateCommand::new(args).execute(&settings, display).await,
            Commands::Add(args) => AddCommand::new(args).execute(&settings, display).await,
            Commands::Quote(args) => QuoteCommand::new(args).execute(&settings, display).await,
            Commands::Suggest(args) => SuggestCommand::new(args).execute(&settings, display).await,
            Commands::Watch(args) => WatchCommand::new(args).execute(&settings, display).await,
            Commands::Version(args) => VersionCommand::new(args).execute(&settings, display).await,
        }
    }
}
