// Runtime configuration: where the shortening API lives and how long we are
// willing to wait for it. Defaults reproduce the tool's fixed behavior; the
// environment can override the endpoint (useful for tests and mirrors).

use std::time::Duration;

/// TinyURL's plain-text creation endpoint.
pub const DEFAULT_API_URL: &str = "https://tinyurl.com/api-create.php";

/// Longest percent-encoded URL the API accepts from us.
pub const MAX_ENCODED_URL_LEN: usize = 900;

pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(8);

/// Redirect hops followed when unshortening.
pub const MAX_REDIRECTS: usize = 30;

/// Settings shared by both operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_redirects: usize,
    pub max_encoded_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            request_timeout: REQUEST_TIMEOUT,
            max_redirects: MAX_REDIRECTS,
            max_encoded_len: MAX_ENCODED_URL_LEN,
        }
    }
}

impl Config {
    /// Build the configuration from `TINYURL_API_URL`, falling back to the
    /// public TinyURL endpoint when unset or empty.
    pub fn from_env() -> Self {
        let api_url = std::env::var("TINYURL_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.into());
        Config {
            api_url,
            ..Config::default()
        }
    }

    /// Same defaults, different endpoint.
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Config {
            api_url: api_url.into(),
            ..Config::default()
        }
    }
}
