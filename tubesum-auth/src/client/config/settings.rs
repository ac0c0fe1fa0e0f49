use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Address the API server redirects the browser to after login.
    #[serde(default = "default_callback_addr")]
    pub callback_addr: String,

    #[serde(default = "default_login_timeout")]
    pub login_timeout_secs: u64,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_api_url() -> String {
    tubesum_api::DEFAULT_BASE_URL.to_string()
}

fn default_callback_addr() -> String {
    "127.0.0.1:5173".to_string()
}

fn default_login_timeout() -> u64 {
    300
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            callback_addr: default_callback_addr(),
            login_timeout_secs: default_login_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("TUBESUM_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("TUBESUM").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.api_url.is_empty() {
            return Err("api_url is required".to_string());
        }
        if !self.api_url.starts_with("http") {
            return Err("api_url must be a valid HTTP(S) URL".to_string());
        }
        self.callback_socket_addr()?;
        if self.login_timeout_secs == 0 {
            return Err("login_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn callback_socket_addr(&self) -> Result<SocketAddr, String> {
        self.callback_addr
            .parse()
            .map_err(|_| format!("callback_addr '{}' is not a socket address", self.callback_addr))
    }

    pub fn login_timeout(&self) -> Duration {
        Duration::from_secs(self.login_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.api_url, "http://localhost:8000");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_http_url() {
        let settings = Settings {
            api_url: "localhost:8000".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_callback_addr() {
        let settings = Settings {
            callback_addr: "localhost".to_string(),
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
