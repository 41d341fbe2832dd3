//! Server settings. `main` loads `.env` first, so values set there reach
//! the same lookup as real environment variables (which take precedence).

use std::env;

use krill_core::ApiConfig;

pub const PORT_VAR: &str = "PORT";
pub const DEFAULT_PORT: &str = "3000";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: String,
    pub api: ApiConfig,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup(PORT_VAR).unwrap_or_else(|| DEFAULT_PORT.to_string());
        Self {
            addr: format!("127.0.0.1:{port}"),
            api: ApiConfig::from_lookup(&lookup),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn dotenv_file(contents: &str) -> HashMap<String, String> {
        dotenv::from_read_iter(contents.as_bytes())
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn reads_dotenv_formatted_settings() {
        let vars = dotenv_file(
            "# local overrides\n\
             PORT=4000\n\
             NEXT_PUBLIC_APIURL=http://backend:9000\n\
             NEXT_PUBLIC_NEXTAPIURL=\"https://krill.space\"\n",
        );
        let config = ServerConfig::from_lookup(|key| vars.get(key).cloned());
        assert_eq!(config.addr, "127.0.0.1:4000");
        assert_eq!(config.api, ApiConfig::new("http://backend:9000", "https://krill.space"));
    }

    #[test]
    fn missing_settings_use_defaults() {
        let config = ServerConfig::from_lookup(|_| None);
        assert_eq!(config.addr, "127.0.0.1:3000");
        assert_eq!(config.api, ApiConfig::default());
    }
}
