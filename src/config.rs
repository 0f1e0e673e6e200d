//! Configuration for mcprobe

use serde::Deserialize;
use std::time::Duration;

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_ENV: &str = "MCPROBE_CONFIG";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub probe: ProbeConfig,
}

/// Probe configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Deadline in milliseconds for connect plus first response (0 = no deadline)
    pub timeout_ms: u64,

    /// Initial read buffer size (bytes)
    pub read_buffer_size: usize,

    /// Stop collecting the stats response past this many bytes
    pub max_response_bytes: usize,

    /// Disable Nagle's algorithm on the probe socket
    pub nodelay: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            read_buffer_size: 4096,
            max_response_bytes: 64 * 1024,
            nodelay: true,
        }
    }
}

impl ProbeConfig {
    /// Configured deadline, `None` when disabled
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| crate::ProbeError::Config(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(contents: &str) -> crate::Result<Self> {
        toml::from_str(contents)
            .map_err(|e| crate::ProbeError::Config(format!("Failed to parse config: {e}")))
    }

    /// Load the file named by `MCPROBE_CONFIG` (or defaults), then apply
    /// `MCPROBE_*` overrides
    pub fn load() -> crate::Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) if !path.is_empty() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup
    pub fn apply_env<F>(&mut self, var: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = var("MCPROBE_TIMEOUT_MS") {
            self.probe.timeout_ms = parse_var("MCPROBE_TIMEOUT_MS", &value)?;
        }

        if let Some(value) = var("MCPROBE_READ_BUFFER_SIZE") {
            self.probe.read_buffer_size = parse_var("MCPROBE_READ_BUFFER_SIZE", &value)?;
        }

        if let Some(value) = var("MCPROBE_MAX_RESPONSE_BYTES") {
            self.probe.max_response_bytes = parse_var("MCPROBE_MAX_RESPONSE_BYTES", &value)?;
        }

        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> crate::Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| crate::ProbeError::Config(format!("Invalid value for {key}: {value:?}")))
}
