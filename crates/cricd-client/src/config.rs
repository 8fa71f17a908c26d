//! Statistics API connection settings

use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3001;

/// Where the statistics API lives and how to identify ourselves to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL without a trailing slash, e.g. `http://localhost:3001`
    pub base_url: String,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl ApiConfig {
    /// Plain-HTTP config for `host:port`.
    pub fn new(host: &str, port: u16) -> Self {
        Self::with_base_url(&format!("http://{host}:{port}"))
    }

    /// Config for an explicit base URL.
    pub fn with_base_url(base_url: &str) -> Self {
        ApiConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_agent: format!("cricd-import/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
