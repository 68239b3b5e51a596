use crate::Result;
use camino::Utf8Path;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

const LOG_TARGET: &str = "    config";

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "trustscore.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Budget for one metric evaluation, in milliseconds
    #[serde(default = "default_metric_timeout_ms")]
    pub metric_timeout_ms: u64,

    #[serde(default = "default_max_concurrent_groups")]
    pub max_concurrent_groups: usize,

    #[serde(default = "default_max_concurrent_metrics")]
    pub max_concurrent_metrics: usize,

    #[serde(default = "default_max_concurrent_requests")]
    pub max_concurrent_requests: usize,

    /// Budget for one HTTP request, in milliseconds
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default = "default_hub_base_url")]
    pub hub_base_url: String,

    #[serde(default = "default_github_api_url")]
    pub github_api_url: String,
}

const fn default_metric_timeout_ms() -> u64 {
    10_000
}

const fn default_max_concurrent_groups() -> usize {
    4
}

const fn default_max_concurrent_metrics() -> usize {
    8
}

const fn default_max_concurrent_requests() -> usize {
    8
}

const fn default_request_timeout_ms() -> u64 {
    8_000
}

fn default_hub_base_url() -> String {
    "https://huggingface.co".to_string()
}

fn default_github_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `trustscore.toml` in `base_dir` is used when it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or holds invalid values
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading trustscore configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
                Err(e) => return Err(e).into_app_err_with(|| format!("reading trustscore configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!(target: LOG_TARGET, "Loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a limit is zero or a base URL does not parse
    pub fn validate(&self) -> Result<()> {
        if self.metric_timeout_ms == 0 {
            return Err(app_err!("metric_timeout_ms must be greater than 0"));
        }

        if self.request_timeout_ms == 0 {
            return Err(app_err!("request_timeout_ms must be greater than 0"));
        }

        for (name, value) in [
            ("max_concurrent_groups", self.max_concurrent_groups),
            ("max_concurrent_metrics", self.max_concurrent_metrics),
            ("max_concurrent_requests", self.max_concurrent_requests),
        ] {
            if value == 0 {
                return Err(app_err!("{name} must be at least 1"));
            }
        }

        for (name, value) in [("hub_base_url", &self.hub_base_url), ("github_api_url", &self.github_api_url)] {
            let url = Url::parse(value).map_err(|e| app_err!("{name} '{value}' is not a valid URL: {e}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(app_err!("{name} '{value}' must be an http or https URL"));
            }
        }

        Ok(())
    }

    #[must_use]
    pub const fn metric_timeout(&self) -> Duration {
        Duration::from_millis(self.metric_timeout_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
