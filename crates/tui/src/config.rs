use alert_control_streamlabs::api::STREAMLABS_API_V2;
use alert_control_streamlabs::auth::{OAuthCredentials, DEFAULT_REDIRECT_URI};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub streamlabs: StreamlabsConfig,
    pub proxy: ProxyConfig,
    pub sync: SyncConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamlabsConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub api_base: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub control_poll_secs: u64,
    pub display_poll_secs: u64,
}

impl Default for StreamlabsConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            api_base: STREAMLABS_API_V2.to_string(),
        }
    }
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
        }
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            control_poll_secs: 5,
            display_poll_secs: 2,
        }
    }
}

impl SyncConfig {
    pub fn control_interval(&self) -> Duration {
        Duration::from_secs(self.control_poll_secs.max(1))
    }

    pub fn display_interval(&self) -> Duration {
        Duration::from_secs(self.display_poll_secs.max(1))
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// `STREAMLABS_CLIENT_ID`, `STREAMLABS_CLIENT_SECRET` and
    /// `ALERT_PROXY_URL` take precedence over the file.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(id) = lookup("STREAMLABS_CLIENT_ID") {
            self.streamlabs.client_id = id;
        }
        if let Some(secret) = lookup("STREAMLABS_CLIENT_SECRET") {
            self.streamlabs.client_secret = secret;
        }
        if let Some(url) = lookup("ALERT_PROXY_URL") {
            self.proxy.base_url = url;
        }
        self
    }

    pub fn oauth_credentials(&self) -> OAuthCredentials {
        OAuthCredentials {
            client_id: self.streamlabs.client_id.clone(),
            client_secret: self.streamlabs.client_secret.clone(),
            redirect_uri: self.streamlabs.redirect_uri.clone(),
            api_base: self.streamlabs.api_base.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_credentials_override_file() {
        let config: Config = toml::from_str(
            r#"
            [streamlabs]
            client_id = "from-file"

            [sync]
            display_poll_secs = 3
            "#,
        )
        .unwrap();
        let config = config.with_overrides(|key| match key {
            "STREAMLABS_CLIENT_ID" => Some("from-env".to_string()),
            "STREAMLABS_CLIENT_SECRET" => Some("s3cret".to_string()),
            _ => None,
        });

        let creds = config.oauth_credentials();
        assert_eq!(creds.client_id, "from-env");
        assert_eq!(creds.client_secret, "s3cret");
        assert_eq!(creds.redirect_uri, DEFAULT_REDIRECT_URI);
        assert_eq!(config.proxy.base_url, "http://localhost:3000");
        assert_eq!(config.sync.display_interval(), Duration::from_secs(3));
        assert_eq!(config.sync.control_interval(), Duration::from_secs(5));
    }

    #[test]
    fn zero_interval_is_clamped() {
        let sync = SyncConfig {
            control_poll_secs: 0,
            display_poll_secs: 0,
        };
        assert_eq!(sync.display_interval(), Duration::from_secs(1));
    }
}
