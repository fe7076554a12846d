/// Configuration loading for the Armada playground
///
/// Settings live in a TOML file; secrets (API keys) can be injected through
/// environment variables so they never have to be committed. The loaded
/// `Config` is passed explicitly into `AppState` and every client - there is
/// no ambient global configuration.
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use url::Url;

use crate::types::Environment;

/// Environment variable overriding `sdk.api_key`
pub const SDK_API_KEY_ENV: &str = "SDK_API_KEY";
/// Environment variable overriding `enso.api_key`
pub const ENSO_API_KEY_ENV: &str = "ENSO_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub webserver: WebserverConfig,
    #[serde(default)]
    pub sdk: SdkConfig,
    #[serde(default)]
    pub enso: EnsoConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebserverConfig {
    pub host: String,
    pub port: u16,
}

impl Default for WebserverConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Production SDK backend
    pub prod_url: String,
    /// Optional staging backend; falls back to prod when unset
    #[serde(default)]
    pub staging_url: Option<String>,
    /// Optional local backend; falls back to prod when unset
    #[serde(default)]
    pub local_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            prod_url: "https://sdk.summer.fi/api".to_string(),
            staging_url: None,
            local_url: None,
            api_key: None,
        }
    }
}

impl SdkConfig {
    /// Base URL for a given backend environment
    pub fn url_for(&self, environment: Environment) -> &str {
        match environment {
            Environment::Prod => &self.prod_url,
            Environment::Staging => self.staging_url.as_deref().unwrap_or(&self.prod_url),
            Environment::Local => self.local_url.as_deref().unwrap_or(&self.prod_url),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsoConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

impl Default for EnsoConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.enso.finance/api/v1".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Enable debug log lines
    pub debug: bool,
    /// Slippage applied when a request omits it, in basis points
    pub default_slippage_bps: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            debug: false,
            default_slippage_bps: 50,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webserver: WebserverConfig::default(),
            sdk: SdkConfig::default(),
            enso: EnsoConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load from a file when it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            let mut config = Config::default();
            config.apply_env_overrides();
            config.validate()?;
            Ok(config)
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(SDK_API_KEY_ENV) {
            if !key.is_empty() {
                self.sdk.api_key = Some(key);
            }
        }
        if let Ok(key) = std::env::var(ENSO_API_KEY_ENV) {
            if !key.is_empty() {
                self.enso.api_key = Some(key);
            }
        }
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("sdk.prod_url", Some(self.sdk.prod_url.as_str())),
            ("sdk.staging_url", self.sdk.staging_url.as_deref()),
            ("sdk.local_url", self.sdk.local_url.as_deref()),
            ("enso.api_url", Some(self.enso.api_url.as_str())),
        ] {
            if let Some(value) = value {
                Url::parse(value).with_context(|| format!("Invalid URL in {}: {}", name, value))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.webserver.port, 8080);
        assert_eq!(config.general.default_slippage_bps, 50);
    }

    #[test]
    fn sdk_environments_fall_back_to_prod() {
        let config = SdkConfig {
            prod_url: "https://prod.example/api".to_string(),
            staging_url: Some("https://staging.example/api".to_string()),
            local_url: None,
            api_key: None,
        };
        assert_eq!(
            config.url_for(Environment::Staging),
            "https://staging.example/api"
        );
        assert_eq!(config.url_for(Environment::Local), "https://prod.example/api");
        assert_eq!(config.url_for(Environment::Prod), "https://prod.example/api");
    }

    #[test]
    fn bad_url_is_rejected() {
        let mut config = Config::default();
        config.enso.api_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_partial_toml() {
        let raw = r#"
            [webserver]
            host = "0.0.0.0"
            port = 9000

            [general]
            debug = true
            default_slippage_bps = 75
        "#;
        let config: Config = toml::from_str(raw).unwrap();
        assert_eq!(config.webserver.host, "0.0.0.0");
        assert_eq!(config.webserver.port, 9000);
        assert!(config.general.debug);
        assert_eq!(config.general.default_slippage_bps, 75);
        // untouched sections fall back to defaults
        assert_eq!(config.enso.api_url, "https://api.enso.finance/api/v1");
    }
}
