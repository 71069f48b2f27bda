use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::client::ClientError;
use crate::commands::Command;

pub const DEFAULT_URL: &str = "https://goterra.genouest.org";

#[derive(Parser, Debug)]
#[command(
    name = "goterra-cli",
    version,
    about = "Command-line client for the goterra deployment service"
)]
pub struct Cli {
    /// Authentication API key
    #[arg(long, env = "GOT_APIKEY", hide_env_values = true, global = true)]
    pub apikey: Option<String>,

    /// URL to the goterra host [default: https://goterra.genouest.org]
    #[arg(long, env = "GOT_URL", global = true)]
    pub url: Option<String>,

    /// Log file path
    #[arg(long, env = "GOT_LOG_FILE", global = true)]
    pub log_file: Option<String>,

    /// Config file path [default: <config dir>/goterra/config.toml]
    #[arg(long, env = "GOT_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub url: Option<String>,
    pub apikey: Option<String>,
}

impl ConfigFile {
    pub fn path() -> Option<PathBuf> {
        Some(dirs::config_dir()?.join("goterra").join("config.toml"))
    }

    pub fn load() -> Option<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("ignoring invalid config file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl Cli {
    /// The `--config` file when given, the per-user file otherwise.
    pub fn config_file(&self) -> Option<ConfigFile> {
        match self.config {
            Some(ref path) => ConfigFile::load_from(path),
            None => ConfigFile::load(),
        }
    }
}

/// Connection settings once flags, environment and config file are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub url: String,
    pub api_key: String,
}

impl Settings {
    /// Flags and environment (already merged by clap) win over the file.
    pub fn resolve(cli: &Cli, file: Option<ConfigFile>) -> Result<Self, ClientError> {
        let file = file.unwrap_or_default();
        let url = non_empty(cli.url.clone())
            .or_else(|| non_empty(file.url))
            .unwrap_or_else(|| DEFAULT_URL.to_string());
        let api_key = non_empty(cli.apikey.clone())
            .or_else(|| non_empty(file.apikey))
            .unwrap_or_default();

        if url.is_empty() || api_key.is_empty() {
            return Err(ClientError::ConfigError(
                "apikey and url options must not be empty".to_string(),
            ));
        }
        Ok(Self { url, api_key })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
