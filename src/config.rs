// src/config.rs

use std::env;
use std::path::PathBuf;

/// Environment variable for the JSON collection file
const ENV_STORE_PATH: &str = "MINIFIG_STORE_PATH";

/// Environment variable for the listen address
const ENV_BIND_ADDR: &str = "BIND_ADDR";

/// Environment variable for the catalog site root
const ENV_BRICKSET_BASE_URL: &str = "BRICKSET_BASE_URL";

/// Environment variable for the outbound request timeout
const ENV_HTTP_TIMEOUT: &str = "HTTP_TIMEOUT_SECS";

const DEFAULT_STORE_PATH: &str = "minifigures.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_BRICKSET_BASE_URL: &str = "https://brickset.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_path: PathBuf,
    pub bind_addr: String,
    pub brickset_base_url: String,
    pub http_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            brickset_base_url: DEFAULT_BRICKSET_BASE_URL.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first if a `.env` file should be honoured.
    ///
    /// # Environment Variables
    ///
    /// * `MINIFIG_STORE_PATH` - Collection file (default: minifigures.json)
    /// * `BIND_ADDR` - Listen address (default: 127.0.0.1:5000)
    /// * `BRICKSET_BASE_URL` - Catalog site root (default: https://brickset.com)
    /// * `HTTP_TIMEOUT_SECS` - Outbound request timeout (default: 30)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_path = lookup(ENV_STORE_PATH)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let bind_addr = lookup(ENV_BIND_ADDR)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(defaults.bind_addr);

        let brickset_base_url = lookup(ENV_BRICKSET_BASE_URL)
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or(defaults.brickset_base_url);

        let http_timeout_secs = match lookup(ENV_HTTP_TIMEOUT) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "Invalid {} - using default of {}s",
                        ENV_HTTP_TIMEOUT,
                        DEFAULT_HTTP_TIMEOUT_SECS
                    );
                    DEFAULT_HTTP_TIMEOUT_SECS
                }
            },
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Self {
            store_path,
            bind_addr,
            brickset_base_url,
            http_timeout_secs,
        }
    }
}
