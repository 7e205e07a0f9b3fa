use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use permfixup_core::UserId;

#[derive(Parser)]
#[command(name = "permfixup")]
#[command(about = "permfixup: reset special runtime permission grants to their legacy state")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ~/.permfixup/config.toml)
    #[arg(short, long, global = true, env = "PERMFIXUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Legacy snapshot document (overrides config)
    #[arg(long, global = true, env = "PERMFIXUP_LEGACY_SNAPSHOT")]
    pub legacy_snapshot: Option<PathBuf>,

    /// Live permission state document (overrides config)
    #[arg(long, global = true, env = "PERMFIXUP_LIVE_STATE")]
    pub live_state: Option<PathBuf>,

    /// Log level or filter directive; RUST_LOG takes precedence
    #[arg(long, global = true, env = "PERMFIXUP_LOG")]
    pub log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the fixup for one or more users
    Run(RunArgs),
    /// Inspect CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct RunArgs {
    /// User to reconcile; repeatable. Defaults to every user in the live state
    #[arg(short, long = "user", value_name = "USER_ID")]
    pub users: Vec<UserId>,
    /// Report what would be revoked without writing the live state
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the resolved config
    Show,
}
