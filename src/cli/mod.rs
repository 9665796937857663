//! CLI module for the probe
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `check` - Probe an endpoint once and report the verdict
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Probe with conditions given on the command line
//! probe check http://localhost:8080/health --status 200 --body-contains UP
//!
//! # Probe using probe.toml, JSON report
//! probe check --json
//! ```
//!
//! `check` exits with 0 when healthy, 1 when unhealthy and 2 on invalid input.

pub mod check;
pub mod completions;
pub mod config;
pub mod output;

pub use check::handle_check;
pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Exit code for a healthy verdict
pub const EXIT_HEALTHY: i32 = 0;
/// Exit code for an unhealthy verdict
pub const EXIT_UNHEALTHY: i32 = 1;
/// Exit code for invalid input or configuration
pub const EXIT_ERROR: i32 = 2;

/// probe - single-shot HTTP health probe
#[derive(Parser, Debug)]
#[command(
    name = "probe",
    version,
    about = "Single-shot HTTP health probe with finite timeouts"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Probe an endpoint once
    Check(CheckArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Endpoint URL (overrides the config file)
    pub url: Option<String>,

    /// Path to configuration file
    #[arg(short, long, default_value = "probe.toml")]
    pub config: PathBuf,

    /// Expected HTTP status code
    #[arg(short, long)]
    pub status: Option<u16>,

    /// Text the response body must contain
    #[arg(short, long)]
    pub body_contains: Option<String>,

    /// Overall request timeout in seconds (0 disables)
    #[arg(short, long)]
    pub timeout: Option<f64>,

    /// Connect timeout in seconds (0 disables)
    #[arg(long)]
    pub connect_timeout: Option<f64>,

    /// Read timeout in seconds (0 disables)
    #[arg(long)]
    pub read_timeout: Option<f64>,

    /// Extra request header, "Name: value" (repeatable)
    #[arg(short = 'H', long = "header")]
    pub headers: Vec<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "probe.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
