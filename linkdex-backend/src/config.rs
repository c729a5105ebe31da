use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory holding the catalog snapshot file
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Endpoint of the external web-search provider
    #[serde(default = "default_search_endpoint")]
    pub search_endpoint: String,

    /// Bearer token for the search provider (optional)
    #[serde(default)]
    pub search_api_key: Option<String>,

    /// Cap on search results attached to a response
    #[serde(default = "default_search_max_results")]
    pub search_max_results: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_search_endpoint() -> String {
    "http://127.0.0.1:7700/search".to_string()
}

fn default_search_max_results() -> usize {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            data_dir: default_data_dir(),
            search_endpoint: default_search_endpoint(),
            search_api_key: None,
            search_max_results: default_search_max_results(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))?;

        Ok(config)
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
