//! Client configuration.
//!
//! The base URL is the only setting. It comes from code, never from the
//! environment: callers build a `ClientConfig` or take the default.

/// Public character API used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Where the character resource lives. Requests go to `{base_url}/character`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
