use anyhow::Result;
use colored::Colorize;

use crate::config::Settings;

fn display_path(path: Option<&std::path::Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not set)".to_string())
}

pub fn show(settings: &Settings) -> Result<()> {
    println!(
        "{}: {}",
        "Config file".cyan(),
        display_path(settings.config_path.as_deref())
    );
    println!(
        "{}: {}",
        "Legacy snapshot".cyan(),
        display_path(settings.legacy_snapshot.as_deref())
    );
    println!(
        "{}: {}",
        "Live state".cyan(),
        display_path(settings.live_state.as_deref())
    );
    println!("{}: {}", "Log level".cyan(), settings.log_level);
    println!("{}: {:?}", "Format".cyan(), settings.format);
    Ok(())
}
