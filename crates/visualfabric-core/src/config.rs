//! Remote service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 120;

/// Where the catalog and mockup services live and how long to wait for them.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_catalog_timeout_secs")]
    pub catalog_timeout_secs: u64,
    #[serde(default = "default_generation_timeout_secs")]
    pub generation_timeout_secs: u64,
    /// Send the header that skips the hosting proxy's interstitial page.
    #[serde(default = "default_skip_proxy_warning")]
    pub skip_proxy_warning: bool,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_catalog_timeout_secs() -> u64 {
    DEFAULT_CATALOG_TIMEOUT_SECS
}

fn default_generation_timeout_secs() -> u64 {
    DEFAULT_GENERATION_TIMEOUT_SECS
}

fn default_skip_proxy_warning() -> bool {
    true
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            catalog_timeout_secs: default_catalog_timeout_secs(),
            generation_timeout_secs: default_generation_timeout_secs(),
            skip_proxy_warning: default_skip_proxy_warning(),
        }
    }
}

impl ServiceConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog_timeout_secs)
    }

    pub fn generation_timeout(&self) -> Duration {
        Duration::from_secs(self.generation_timeout_secs)
    }

    /// Joins the base URL and a route with exactly one `/` between them.
    pub fn endpoint(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }
}
