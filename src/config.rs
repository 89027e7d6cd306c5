use std::fs;
use std::path::Path;

use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/balltalk.json";
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/chat";
pub const ENDPOINT_ENV: &str = "BALLTALK_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    /// Không đặt thì dùng timeout mặc định của transport.
    pub request_timeout_secs: Option<u64>,
    pub window_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            window_title: "BALLTALK".to_string(),
        }
    }
}

impl AppConfig {
    /// Applies endpoint overrides; the command line wins over the environment.
    pub fn with_overrides(mut self, env_endpoint: Option<String>, cli_endpoint: Option<String>) -> Self {
        let endpoint = [cli_endpoint, env_endpoint]
            .into_iter()
            .flatten()
            .find(|endpoint| !endpoint.trim().is_empty());
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }
}

pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) => {
            log::info!(
                "Config file {} not found ({err}); using defaults",
                path.display()
            );
            AppConfig::default()
        }
    }
}

/// File config, then `BALLTALK_ENDPOINT`, then `--endpoint`.
pub fn resolve_config(path: &str, cli_endpoint: Option<String>) -> AppConfig {
    let env_endpoint = std::env::var(ENDPOINT_ENV).ok();
    let config = load_config(path).with_overrides(env_endpoint, cli_endpoint);
    log::info!("Using chat endpoint {}", config.endpoint);
    config
}
