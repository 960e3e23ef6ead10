// src/config.rs
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Semaphore;

use crate::errors::{RelayError, Result};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_COMMAND: &str = "claude";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Values injected into the child so it always runs as the same identity.
pub const CHILD_CONFIG_DIR: &str = "/root/.claude";
pub const CHILD_HOME_DIR: &str = "/root";

/// Everything the subprocess bridge needs to launch the external tool.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Program to run.
    pub command: String,
    /// Arguments placed before `--print <prompt>`.
    pub leading_args: Vec<String>,
    /// Injected as `CLAUDE_CONFIG_DIR`.
    pub config_dir: PathBuf,
    /// Injected as `HOME`.
    pub home_dir: PathBuf,
    pub working_dir: Option<PathBuf>,
    pub timeout: Duration,
    /// Upper bound on children running at once. `None` means unbounded.
    pub max_concurrent: Option<usize>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_COMMAND.to_string(),
            leading_args: Vec::new(),
            config_dir: PathBuf::from(CHILD_CONFIG_DIR),
            home_dir: PathBuf::from(CHILD_HOME_DIR),
            working_dir: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_concurrent: None,
        }
    }
}

/// High-level application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// `ANTHROPIC_API_KEY`. An empty value is treated as unset.
    pub api_key: Option<String>,
    pub bridge: BridgeConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            bridge: BridgeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| RelayError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => DEFAULT_PORT,
        };

        let api_key = lookup("ANTHROPIC_API_KEY").filter(|key| !key.is_empty());

        let mut bridge = BridgeConfig::default();

        if let Some(raw) = lookup("CLAUDE_COMMAND") {
            let mut parts = raw.split_whitespace().map(str::to_string);
            bridge.command = parts
                .next()
                .ok_or_else(|| RelayError::Config("CLAUDE_COMMAND is empty".to_string()))?;
            bridge.leading_args = parts.collect();
        }

        bridge.working_dir = lookup("CLAUDE_WORKDIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        if let Some(raw) = lookup("CLAUDE_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                RelayError::Config(format!(
                    "CLAUDE_TIMEOUT_SECS must be a positive number of seconds, got '{}'",
                    raw
                ))
            })?;
            bridge.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup("CLAUDE_MAX_CONCURRENT") {
            let limit = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0 && *n <= Semaphore::MAX_PERMITS)
                .ok_or_else(|| {
                    RelayError::Config(format!(
                        "CLAUDE_MAX_CONCURRENT must be between 1 and {}, got '{}'",
                        Semaphore::MAX_PERMITS,
                        raw
                    ))
                })?;
            bridge.max_concurrent = Some(limit);
        }

        Ok(AppConfig { port, api_key, bridge })
    }
}
