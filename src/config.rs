use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Play in the terminal.
    Interactive,
    /// Apply a move string to one level and print the result.
    Replay,
    /// Validate a campaign and print a summary of each level.
    Check,
}

#[derive(Debug, Parser)]
#[command(name = "color-sokoban", about = "Colored box pushing puzzles in the terminal")]
pub struct Cli {
    #[arg(value_enum, default_value_t = Mode::Interactive)]
    pub mode: Mode,

    /// Campaign json file. The built-in campaign is used when absent.
    #[arg(long)]
    pub levels: Option<PathBuf>,

    /// Zero based level index to start from.
    #[arg(long, default_value_t = 0)]
    pub level: usize,

    /// Moves for replay mode, as a string of U D L R.
    #[arg(long, default_value = "")]
    pub moves: String,

    /// Optional TOML host configuration.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Settings read from the TOML config file. Every key is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub levels: Option<PathBuf>,
    pub best_times: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
}

impl HostConfig {
    pub fn from_toml(text: &str) -> anyhow::Result<HostConfig> {
        toml::from_str(text).context("parsing host config")
    }

    pub fn load(path: &Path) -> anyhow::Result<HostConfig> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("in config {}", path.display()))
    }
}

/// The resolved settings the host runs with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub mode: Mode,
    pub levels: Option<PathBuf>,
    pub start_level: usize,
    pub moves: String,
    pub best_times: PathBuf,
    pub log_dir: PathBuf,
}

impl Settings {
    /// Command line flags win over the config file, which wins over defaults.
    pub fn resolve(cli: Cli, file: HostConfig) -> Settings {
        Settings {
            mode: cli.mode,
            levels: cli.levels.or(file.levels),
            start_level: cli.level,
            moves: cli.moves,
            best_times: file.best_times.unwrap_or_else(|| PathBuf::from("exports/best_times.json")),
            log_dir: file.log_dir.unwrap_or_else(|| PathBuf::from("exports")),
        }
    }

    pub fn from_cli(cli: Cli) -> anyhow::Result<Settings> {
        let file = match &cli.config {
            Some(path) => HostConfig::load(path)?,
            None => HostConfig::default(),
        };
        Ok(Self::resolve(cli, file))
    }
}
