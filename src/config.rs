//! Runtime configuration read from the environment.

use std::env;

/// Backend used when `FLIX_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Client configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root of the backend, e.g. `http://localhost:8000`.
    pub backend_url: String,
}

impl ClientConfig {
    pub fn new(backend_url: impl Into<String>) -> Self {
        Self {
            backend_url: backend_url.into(),
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// An unset or blank `FLIX_BACKEND_URL` falls back to
    /// [`DEFAULT_BACKEND_URL`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("FLIX_BACKEND_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        Self { backend_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BACKEND_URL)
    }
}
