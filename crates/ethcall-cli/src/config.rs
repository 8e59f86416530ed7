//! CLI configuration management
//!
//! Effective settings are layered: built-in defaults, then
//! `~/.ethcall/config.toml`, then environment variables, then command-line
//! flags (applied in `main`).

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use ethcall_sdk::types::RpcEndpoint;

use crate::CliError;

/// Environment variable holding a full RPC URL
pub const RPC_URL_ENV: &str = "ETHCALL_RPC_URL";
/// Environment variable holding an Infura project ID (mainnet)
pub const INFURA_PROJECT_ENV: &str = "INFURA_PROJECT_ID";

/// CLI configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// RPC endpoint URL
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    /// Expected chain ID; queried from the node when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    /// Per-request HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: default_rpc_url(),
            chain_id: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".ethcall"))
    }

    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join("config.toml"))
    }

    /// Load the config file if there is one, then apply the environment
    pub fn load() -> Result<Self, CliError> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Override settings from environment variables read through `var`.
    ///
    /// `ETHCALL_RPC_URL` wins over `INFURA_PROJECT_ID`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(RPC_URL_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(env = RPC_URL_ENV, "RPC URL taken from environment");
            self.rpc_url = url;
        } else if let Some(project) = var(INFURA_PROJECT_ENV).filter(|v| !v.is_empty()) {
            tracing::debug!(env = INFURA_PROJECT_ENV, "RPC URL built from Infura project ID");
            self.rpc_url = format!("https://mainnet.infura.io/v3/{}", project);
        }
    }

    /// Save config to the default file
    pub fn save(&self) -> Result<PathBuf, CliError> {
        let path = Self::config_path()
            .ok_or_else(|| CliError::Config("Cannot determine config path".to_string()))?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to a specific file
    pub fn save_to(&self, path: &Path) -> Result<(), CliError> {
        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| CliError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Endpoint handed to the SDK
    pub fn endpoint(&self) -> RpcEndpoint {
        RpcEndpoint {
            url: self.rpc_url.clone(),
            chain_id: self.chain_id,
        }
    }

    /// Per-request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
