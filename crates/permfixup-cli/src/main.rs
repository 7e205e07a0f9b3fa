mod cli;
mod commands;
mod config;
mod observability;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, ConfigCommands};
use output::print_error;

fn main() {
    if let Err(e) = run() {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = config::resolve(&cli)?;
    observability::init_tracing_with_level(&settings.log_level);

    match &cli.command {
        Commands::Run(args) => commands::run::run(&settings, args)?,
        Commands::Config(args) => match &args.command {
            ConfigCommands::Show => commands::config::show(&settings)?,
        },
    }

    Ok(())
}
