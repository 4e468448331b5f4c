use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid {field} {value:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_console_name")]
    pub console_name: String,
    #[serde(default = "default_listen_port")]
    pub listen_port: u16,
    pub api: ApiConfig,
    /// Where the upstream UI lives, used for configuration links.
    #[serde(default)]
    pub ui_base_url: Option<String>,
    /// Forces the dynamic config capability instead of asking the upstream.
    #[serde(default)]
    pub dynamic_config: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_console_name() -> String {
    "Kafka Console".to_string()
}

fn default_listen_port() -> u16 {
    9090
}

fn default_timeout_secs() -> u64 {
    10
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&data)
    }

    pub fn from_yaml(data: &str) -> Result<Self, ConfigError> {
        let mut cfg: Config = serde_yaml::from_str(data)?;

        cfg.api.base_url = validate_url("api.base_url", &cfg.api.base_url)?;
        if let Some(ref ui) = cfg.ui_base_url {
            cfg.ui_base_url = Some(validate_url("ui_base_url", ui)?);
        }

        Ok(cfg)
    }

    pub fn listen_addr(&self) -> String {
        format!("0.0.0.0:{}", self.listen_port)
    }

    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs.max(1))
    }

    /// Falls back to the API address; the upstream serves UI and API together.
    pub fn ui_base_url(&self) -> &str {
        self.ui_base_url.as_deref().unwrap_or(&self.api.base_url)
    }
}

fn validate_url(field: &'static str, raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        field,
        value: raw.to_string(),
        reason,
    };

    let url = reqwest::Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("scheme must be http or https".to_string()));
    }

    Ok(raw.trim().trim_end_matches('/').to_string())
}
