//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for gavel
#[derive(Parser, Debug)]
#[command(name = "gavel")]
#[command(author, version, about = "Session host for a committee's shared procedural state")]
#[command(long_about = r#"
Gavel hosts the live procedural state of one committee session: shared
timers, the speaker queue, and the ranked agenda of pending motions, kept
consistent across every connected viewer through a subscribe/write store.

The host seeds the committee document, renders state as it changes, and
keeps the projector bridge available for a secondary display.

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./gavel.toml        Project-level config
3. ~/.config/gavel/config.toml   Global config

Example:
  gavel
  gavel security-council --chair "Director"
  gavel -vv --log-file session.log
"#)]
pub struct Cli {
    /// Committee id to host (defaults to the configured committee)
    pub committee: Option<String>,

    /// Chair identity recorded on approvals
    #[arg(long, value_name = "NAME")]
    pub chair: Option<String>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress live state rendering
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config_paths: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
