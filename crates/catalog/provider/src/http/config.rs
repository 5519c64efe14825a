//! HTTP provider configuration.
use std::env;
use std::time::Duration;

use crate::endpoints::DEFAULT_BASE_URL;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpConfig {
    pub base_url: String,
    /// Per-request timeout. `None` waits as long as the connection does.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
        }
    }
}

impl HttpConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `POKEDEX_API_BASE` - Provider base url (default: `https://pokeapi.co/api/v2`)
    /// - `POKEDEX_REQUEST_TIMEOUT_SECS` - Per-request timeout in seconds (default: none)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(base) = env::var("POKEDEX_API_BASE")
            .ok()
            .filter(|base| !base.trim().is_empty())
        {
            config.base_url = base.trim().to_string();
        }

        if let Some(secs) = read_env::<u64>("POKEDEX_REQUEST_TIMEOUT_SECS").filter(|s| *s > 0) {
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
