/*
[INPUT]:  YAML configuration file and STOCKFIGHTER_* environment variables
[OUTPUT]: Parsed CLI configuration and the adapter's ClientConfig
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use stockfighter_adapter::ClientConfig;

/// Environment prefix; `STOCKFIGHTER_API_KEY` maps to `api_key`.
pub const ENV_PREFIX: &str = "STOCKFIGHTER";

/// Top-level configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    /// API key sent in the auth header
    #[serde(default)]
    pub api_key: String,
    /// Trading account held by the client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    /// Venue used when a command omits `--venue`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Stock used when a command omits `--stock`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gm_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_header: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load the YAML file (optional) and overlay environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(
                config::File::from(path)
                    .format(config::FileFormat::Yaml)
                    .required(true),
            );
        }
        let settings = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("read configuration")?;
        settings
            .try_deserialize()
            .context("parse configuration")
    }

    /// Load configuration from YAML file only
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.api_key.trim().is_empty() {
            bail!("api_key is not set (config file or {ENV_PREFIX}_API_KEY)");
        }

        let mut client = ClientConfig::new(self.api_key.clone());
        client.account = self.account.clone();
        if let Some(url) = &self.rest_url {
            client = client.with_rest_url(url.clone());
        }
        if let Some(url) = &self.stream_url {
            client = client.with_stream_url(url.clone());
        }
        if let Some(url) = &self.gm_url {
            client = client.with_gm_url(url.clone());
        }
        if let Some(header) = &self.auth_header {
            client = client.with_auth_header(header.clone());
        }
        if let Some(timeout) = self.timeout_secs {
            client.timeout_secs = timeout;
        }
        Ok(client)
    }

    /// Explicit flag value, else the configured default.
    pub fn venue_or(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.venue.clone())
            .context("no venue given (--venue or `venue` in config)")
    }

    pub fn stock_or(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.stock.clone())
            .context("no stock given (--stock or `stock` in config)")
    }
}
