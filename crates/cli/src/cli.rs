//! CLI argument definitions using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Packet Router - id-based packet routing pipeline
#[derive(Parser, Debug)]
#[command(
    name = "packet-router",
    author,
    version,
    about = "Id-based packet routing pipeline",
    long_about = "Routes packets from a producer stream to per-id handlers.\n\n\
                  Loads a scenario, builds the routing table, plays the packet \n\
                  script through the dispatcher, and audits failed or unroutable \n\
                  packets to the configured sink."
)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, env = "PACKET_ROUTER_VERBOSE")]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log output format
    #[arg(
        long,
        value_enum,
        default_value = "pretty",
        global = true,
        env = "PACKET_ROUTER_LOG_FORMAT"
    )]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a routing scenario
    Run(RunArgs),

    /// Validate a scenario file without running
    Validate(ValidateArgs),
}

/// Arguments for the `run` command
#[derive(Parser, Debug, Clone)]
pub struct RunArgs {
    /// Path to scenario file (TOML or JSON)
    #[arg(
        short,
        long,
        default_value = "scenario.toml",
        env = "PACKET_ROUTER_SCENARIO"
    )]
    pub scenario: PathBuf,

    /// Run the built-in reference scenario instead of loading a file
    #[arg(long, conflicts_with = "scenario")]
    pub builtin: bool,

    /// Override inter-packet interval from the scenario, in milliseconds
    #[arg(long, env = "PACKET_ROUTER_INTERVAL_MS")]
    pub interval_ms: Option<u64>,

    /// Validate the scenario and exit without running
    #[arg(long)]
    pub dry_run: bool,

    /// Metrics server port (0 = disabled)
    #[arg(long, default_value = "0", env = "PACKET_ROUTER_METRICS_PORT")]
    pub metrics_port: u16,
}

/// Arguments for the `validate` command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to scenario file to validate
    #[arg(short, long, default_value = "scenario.toml")]
    pub scenario: PathBuf,

    /// Output validation result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Log output format
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum LogFormat {
    /// JSON structured logging
    Json,
    /// Human-readable pretty format
    #[default]
    Pretty,
    /// Compact single-line format
    Compact,
}
