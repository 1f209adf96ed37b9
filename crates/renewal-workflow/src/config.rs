/*
[INPUT]:  YAML configuration file and RENEWAL__* environment overrides
[OUTPUT]: Validated WorkflowConfig and adapter ClientConfig
[POS]:    Configuration layer - service, TLS identity, navigation, logging
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use renewal_adapter::{ClientConfig, ClientIdentity};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const ENV_PREFIX: &str = "RENEWAL";
const ENV_SEPARATOR: &str = "__";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// Top-level configuration for the renewal workflow
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WorkflowConfig {
    pub service: ServiceConfig,
    /// Client certificate presented to the service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<TlsConfig>,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ServiceConfig {
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TlsConfig {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_bundle_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavigationConfig {
    /// When set, cancel leaves the screen for this route instead of resetting it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_route: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file; prompts own the terminal so logs go here when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl WorkflowConfig {
    /// Load configuration from a YAML file, applying environment overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        Self::load(path, None)
    }

    /// Same as `from_file` but with an explicit environment, used by tests
    pub fn load(
        path: &Path,
        env: Option<::config::Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let settings = ::config::Config::builder()
            .add_source(
                ::config::File::from(path.to_path_buf()).format(::config::FileFormat::Yaml),
            )
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.service.base_url.trim();
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(ConfigError::Invalid(format!(
                "service.base_url must be an http(s) URL, got {base_url:?}"
            )));
        }
        if self.service.timeout_secs == 0 || self.service.connect_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "service timeouts must be greater than zero".to_string(),
            ));
        }
        if let Some(route) = self.navigation.return_route.as_deref() {
            if route.trim().is_empty() {
                return Err(ConfigError::Invalid(
                    "navigation.return_route must not be empty".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// HTTP client settings for the renewal adapter
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.service.timeout_secs),
            connect_timeout: Duration::from_secs(self.service.connect_timeout_secs),
            identity: self.tls.as_ref().map(|tls| ClientIdentity {
                cert_path: tls.cert_path.clone(),
                key_path: tls.key_path.clone(),
                ca_bundle_path: tls.ca_bundle_path.clone(),
            }),
        }
    }

    /// Starter configuration written by `init`
    pub fn example(base_url: impl Into<String>) -> Self {
        Self {
            service: ServiceConfig {
                base_url: base_url.into(),
                timeout_secs: default_timeout_secs(),
                connect_timeout_secs: default_connect_timeout_secs(),
            },
            tls: None,
            navigation: NavigationConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
