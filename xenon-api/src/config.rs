//! Explicit configuration for the xenon clients
//!
//! Every setting is a named field with a documented default. Files are TOML:
//!
//! ```toml
//! [http]
//! connect_timeout_secs = 5
//! read_timeout_secs = 10
//!
//! [spotify]
//! access_token = "BQD..."
//! market = "gb"
//!
//! [govee]
//! api_key = "..."
//!
//! [smh]
//! access_token = "..."
//! ```

use std::path::Path;
use std::time::Duration;

use http_client::HttpClient;
use serde::Deserialize;

use crate::credentials::{ApiKey, BearerToken};
use crate::error::{ApiError, Result};
use crate::govee::GoveeClient;
use crate::smh::SmhClient;
use crate::spotify::SpotifyClient;

/// Transport settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connect timeout in seconds
    /// Default: 5
    pub connect_timeout_secs: u64,

    /// Read timeout in seconds
    /// Default: 10
    pub read_timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 5,
            read_timeout_secs: 10,
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }
}

/// Music service settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpotifyConfig {
    /// Default: `https://api.spotify.com/v1`
    pub base_url: String,

    /// Market used when an endpoint takes one and the caller gives none
    /// Default: "gb"
    pub market: String,

    /// Access token from the OAuth flow
    /// Default: none
    pub access_token: Option<String>,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            base_url: crate::spotify::BASE_URL.to_string(),
            market: crate::spotify::DEFAULT_MARKET.to_string(),
            access_token: None,
        }
    }
}

/// Smart-light service settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GoveeConfig {
    /// Default: `https://developer-api.govee.com/v1`
    pub base_url: String,

    /// Default: none
    pub api_key: Option<String>,
}

impl Default for GoveeConfig {
    fn default() -> Self {
        Self {
            base_url: crate::govee::BASE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Homework service settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SmhConfig {
    /// Default: `https://api.satchelone.com/api`
    pub base_url: String,

    /// Default: none
    pub access_token: Option<String>,
}

impl Default for SmhConfig {
    fn default() -> Self {
        Self {
            base_url: crate::smh::BASE_URL.to_string(),
            access_token: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct XenonConfig {
    pub http: HttpConfig,
    pub spotify: SpotifyConfig,
    pub govee: GoveeConfig,
    pub smh: SmhConfig,
}

impl XenonConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| ApiError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("unable to read {}: {}", path.display(), e))
        })?;
        tracing::debug!("loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Validate the configuration and return any issues
    pub fn validate(&self) -> Result<()> {
        if self.http.connect_timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "Connect timeout must be greater than 0".to_string(),
            ));
        }

        if self.http.read_timeout_secs == 0 {
            return Err(ApiError::ConfigError(
                "Read timeout must be greater than 0".to_string(),
            ));
        }

        for (section, url) in [
            ("spotify", &self.spotify.base_url),
            ("govee", &self.govee.base_url),
            ("smh", &self.smh.base_url),
        ] {
            if url.trim().is_empty() {
                return Err(ApiError::ConfigError(format!(
                    "[{}] base_url must not be empty",
                    section
                )));
            }
        }

        if self.spotify.market.len() != 2 {
            return Err(ApiError::ConfigError(format!(
                "[spotify] market '{}' is not an ISO 3166-1 alpha-2 code",
                self.spotify.market
            )));
        }

        Ok(())
    }

    /// Transport honouring the configured timeouts
    pub fn http_client(&self) -> HttpClient {
        HttpClient::with_timeouts(self.http.connect_timeout(), self.http.read_timeout())
    }

    pub fn spotify_client(&self) -> Result<SpotifyClient> {
        let token = required(&self.spotify.access_token, "spotify", "access_token")?;
        Ok(SpotifyClient::new(BearerToken::new(token))
            .with_base_url(&self.spotify.base_url)
            .with_market(&self.spotify.market))
    }

    pub fn govee_client(&self) -> Result<GoveeClient> {
        let key = required(&self.govee.api_key, "govee", "api_key")?;
        Ok(GoveeClient::new(ApiKey::new(key)).with_base_url(&self.govee.base_url))
    }

    pub fn smh_client(&self) -> Result<SmhClient> {
        let token = required(&self.smh.access_token, "smh", "access_token")?;
        Ok(SmhClient::new(BearerToken::new(token)).with_base_url(&self.smh.base_url))
    }
}

fn required<'a>(value: &'a Option<String>, section: &str, key: &str) -> Result<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ApiError::ConfigError(format!("[{}] {} is not set", section, key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = XenonConfig::default();
        assert_eq!(config.http.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.http.read_timeout(), Duration::from_secs(10));
        assert_eq!(config.spotify.base_url, "https://api.spotify.com/v1");
        assert_eq!(config.spotify.market, "gb");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = XenonConfig::from_toml_str(
            r#"
            [http]
            read_timeout_secs = 30

            [spotify]
            access_token = "token"
            market = "us"
            "#,
        )
        .unwrap();

        assert_eq!(config.http.connect_timeout_secs, 5);
        assert_eq!(config.http.read_timeout_secs, 30);
        assert_eq!(config.spotify.market, "us");

        let client = config.spotify_client().unwrap();
        assert_eq!(client.market(), "us");
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = XenonConfig::from_toml_str("[http]\nconnect_timeout_secs = 0\n");
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn test_unknown_types_rejected() {
        let result = XenonConfig::from_toml_str("[http]\nread_timeout_secs = \"soon\"\n");
        assert!(matches!(result, Err(ApiError::ConfigError(_))));
    }

    #[test]
    fn test_missing_credential() {
        let config = XenonConfig::default();
        if let Err(ApiError::ConfigError(msg)) = config.govee_client() {
            assert!(msg.contains("api_key"));
        } else {
            panic!("Expected ConfigError");
        }
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("xenon-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[smh]\naccess_token = \"abc\"\n").unwrap();

        let config = XenonConfig::from_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(config.smh_client().is_ok());

        assert!(matches!(
            XenonConfig::from_file("/nonexistent/xenon.toml"),
            Err(ApiError::ConfigError(_))
        ));
    }
}
