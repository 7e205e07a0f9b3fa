use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

const DEFAULT_LOG_LEVEL: &str = "info";

/// Contents of `config.toml`. Every key is optional.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct FileConfig {
    pub legacy_snapshot: Option<PathBuf>,
    pub live_state: Option<PathBuf>,
    pub log_level: Option<String>,
    pub format: Option<String>,
}

/// Settings after merging CLI flags, environment, config file and defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: Option<PathBuf>,
    pub legacy_snapshot: Option<PathBuf>,
    pub live_state: Option<PathBuf>,
    pub log_level: String,
    pub format: OutputFormat,
}

impl Settings {
    pub fn legacy_snapshot(&self) -> Result<&Path> {
        self.legacy_snapshot.as_deref().context(
            "No legacy snapshot configured. Use --legacy-snapshot, set PERMFIXUP_LEGACY_SNAPSHOT, or add legacy_snapshot to the config file",
        )
    }

    pub fn live_state(&self) -> Result<&Path> {
        self.live_state.as_deref().context(
            "No live state configured. Use --live-state, set PERMFIXUP_LIVE_STATE, or add live_state to the config file",
        )
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".permfixup").join("config.toml"))
}

/// Loads `path`, treating a missing file as an empty config.
pub fn load_file(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Cannot read config file {}", path.display()))?;
    let cfg: FileConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(cfg)
}

/// Paths in the config file are relative to the file itself.
fn relative_to(base: Option<&Path>, path: PathBuf) -> PathBuf {
    match base {
        Some(dir) if path.is_relative() => dir.join(path),
        _ => path,
    }
}

pub fn resolve(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.clone().or_else(default_config_path);
    let file = match &config_path {
        Some(path) => load_file(path)?,
        None => FileConfig::default(),
    };
    let base = config_path.as_deref().and_then(Path::parent);

    // 1. --flag / PERMFIXUP_* env, 2. config file, 3. default
    let legacy_snapshot = cli
        .legacy_snapshot
        .clone()
        .or_else(|| file.legacy_snapshot.map(|p| relative_to(base, p)));
    let live_state = cli
        .live_state
        .clone()
        .or_else(|| file.live_state.map(|p| relative_to(base, p)));
    let log_level = cli
        .log_level
        .clone()
        .or(file.log_level)
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let format = match (cli.format, file.format) {
        (Some(format), _) => format,
        (None, Some(name)) => OutputFormat::from_str(&name, true).map_err(|_| {
            anyhow::anyhow!("Unknown output format in config: {name}. Valid formats: json, table")
        })?,
        (None, None) => OutputFormat::default(),
    };

    Ok(Settings {
        config_path,
        legacy_snapshot,
        live_state,
        log_level,
        format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["permfixup"];
        full.extend_from_slice(args);
        full.extend_from_slice(&["config", "show"]);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_file(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn test_file_values_resolve_relative_to_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "legacy_snapshot = \"legacy.json\"\nlive_state = \"/var/lib/live.json\"\nlog_level = \"debug\"\nformat = \"table\"\n",
        )
        .unwrap();

        let settings = resolve(&parse(&["--config", path.to_str().unwrap()])).unwrap();

        assert_eq!(settings.legacy_snapshot, Some(dir.path().join("legacy.json")));
        assert_eq!(settings.live_state, Some(PathBuf::from("/var/lib/live.json")));
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "live_state = \"live.json\"\nformat = \"table\"\n").unwrap();

        let settings = resolve(&parse(&[
            "--config",
            path.to_str().unwrap(),
            "--live-state",
            "/tmp/other.json",
            "--format",
            "json",
        ]))
        .unwrap();

        assert_eq!(settings.live_state, Some(PathBuf::from("/tmp/other.json")));
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.log_level, DEFAULT_LOG_LEVEL);
        assert!(settings.legacy_snapshot().is_err());
    }

    #[test]
    fn test_unknown_format_in_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "format = \"yaml\"\n").unwrap();

        let err = resolve(&parse(&["--config", path.to_str().unwrap()])).unwrap_err();
        assert!(err.to_string().contains("Unknown output format"));
    }
}
