use alert_control_streamlabs::api::{STREAMLABS_API_V1, STREAMLABS_API_V2};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub host: String,
    pub port: u16,
    pub api_v1_base: String,
    pub api_v2_base: String,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            api_v1_base: STREAMLABS_API_V1.to_string(),
            api_v2_base: STREAMLABS_API_V2.to_string(),
        }
    }
}

impl ProxyConfig {
    pub fn default_path() -> PathBuf {
        if let Some(proj_dirs) = ProjectDirs::from("com", "alert-control", "alert-control") {
            proj_dirs.config_dir().join("proxy.toml")
        } else {
            PathBuf::from("config/proxy.toml")
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: ProxyConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Using default proxy config: {:#}", e);
                Self::default()
            }
        }
    }

    /// Applies `PROXY_HOST`, `PROXY_PORT`, `STREAMLABS_API_V1` and
    /// `STREAMLABS_API_V2` on top of the file values.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("PROXY_HOST") {
            self.host = host;
        }
        if let Some(port) = lookup("PROXY_PORT").and_then(|p| p.parse().ok()) {
            self.port = port;
        }
        if let Some(base) = lookup("STREAMLABS_API_V1") {
            self.api_v1_base = base;
        }
        if let Some(base) = lookup("STREAMLABS_API_V2") {
            self.api_v2_base = base;
        }
        self
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }
}
