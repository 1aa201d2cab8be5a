use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub page: PageConfig,
}

/// Where the feed lives and how to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Scheme + host + port of the feed site (e.g., "http://127.0.0.1:8000").
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path of the event feed page (default: "/").
    #[serde(default = "default_feed_path")]
    pub feed_path: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Total request timeout. Unset means the HTTP client's default.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
}

/// Page behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Viewports narrower than this open the filter drawer on chip clicks.
    #[serde(default = "default_narrow_viewport_px")]
    pub narrow_viewport_px: u32,
    /// Width the headless page reports as its viewport.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_feed_path() -> String {
    "/".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_narrow_viewport_px() -> u32 {
    768
}

fn default_viewport_width() -> u32 {
    1280
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            feed_path: default_feed_path(),
            connect_timeout_seconds: default_connect_timeout(),
            request_timeout_seconds: None,
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            narrow_viewport_px: default_narrow_viewport_px(),
            viewport_width: default_viewport_width(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            page: PageConfig::default(),
        }
    }
}
