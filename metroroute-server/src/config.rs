use std::path::{Path, PathBuf};

use axum::BoxError;
use metroroute_core::NetworkConfig;
use serde::Deserialize;

/// Contents of the server TOML file. Both tables are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub data: Option<NetworkConfig>,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub bind: String,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            request_timeout_secs: 10,
            max_concurrent_requests: 64,
        }
    }
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self, BoxError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
        Self::from_toml(&raw)
    }

    pub fn from_toml(raw: &str) -> Result<Self, BoxError> {
        Ok(toml::from_str(raw)?)
    }

    /// Applies command line overrides and returns the network config to load.
    ///
    /// A `--data` path replaces the configured one but keeps its delimiter
    /// and header settings.
    pub fn resolve(
        &mut self,
        data: Option<PathBuf>,
        bind: Option<String>,
    ) -> Result<NetworkConfig, BoxError> {
        if let Some(bind) = bind {
            self.http.bind = bind;
        }
        if self.http.max_concurrent_requests == 0 {
            return Err("http.max_concurrent_requests must be at least 1".into());
        }

        match (self.data.clone(), data) {
            (Some(mut network), Some(path)) => {
                network.data_path = path;
                Ok(network)
            }
            (None, Some(path)) => Ok(NetworkConfig::new(path)),
            (Some(network), None) => Ok(network),
            (None, None) => Err("no data file given: set [data].data_path or pass --data".into()),
        }
    }
}
