//! Backend locations.
//!
//! Base URLs are resolved once, by the binary, and handed to `ApiClient` at
//! construction. Nothing below this module reads the environment.

use std::env;

pub const APIURL_VAR: &str = "NEXT_PUBLIC_APIURL";
pub const NEXTAPIURL_VAR: &str = "NEXT_PUBLIC_NEXTAPIURL";

pub const DEFAULT_API_URL: &str = "http://localhost:3004";
pub const DEFAULT_NEXT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Serves `/todos` and `/posts`.
    pub api_url: String,
    /// Serves `/api/hello`.
    pub next_api_url: String,
}

impl ApiConfig {
    pub fn new(api_url: impl Into<String>, next_api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            next_api_url: next_api_url.into(),
        }
    }

    /// Both endpoints served from one origin, as the mock server does.
    pub fn single(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self::new(base_url.clone(), base_url)
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            api_url: get(APIURL_VAR, DEFAULT_API_URL),
            next_api_url: get(NEXTAPIURL_VAR, DEFAULT_NEXT_API_URL),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_NEXT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variables_fall_back_to_localhost() {
        let config = ApiConfig::from_lookup(|_| None);
        assert_eq!(config, ApiConfig::default());
        assert_eq!(config.api_url, "http://localhost:3004");
    }

    #[test]
    fn variables_override_defaults() {
        let config = ApiConfig::from_lookup(|key| match key {
            APIURL_VAR => Some("http://backend:9000".to_string()),
            NEXTAPIURL_VAR => Some("https://krill.space".to_string()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://backend:9000");
        assert_eq!(config.next_api_url, "https://krill.space");
    }

    #[test]
    fn blank_variable_is_ignored() {
        let config = ApiConfig::from_lookup(|key| (key == APIURL_VAR).then(|| "  ".to_string()));
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }
}
