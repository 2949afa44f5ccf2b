//! Server configuration.

use std::env;
use std::time::Duration;

use log::LevelFilter;

/// Runtime configuration for the server.
///
/// Defaults can be overridden from the environment via `HTTP_HOST`,
/// `HTTP_PORT`, and `HTTP_LOG_LEVEL`; values that do not parse fall back
/// to the default.
#[derive(Debug, Clone)]
pub struct Config {
    /// The host to listen on.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// Deadline for the single request read.
    pub read_timeout: Duration,
    /// Deadline for writing the response.
    pub write_timeout: Duration,
    /// The log level threshold.
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "localhost".to_owned(),
            port: 8000,
            read_timeout: Duration::from_secs(30),
            write_timeout: Duration::from_secs(10),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Build a configuration from the environment over the defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(host) = env::var("HTTP_HOST") {
            if !host.is_empty() {
                config.host = host;
            }
        }
        if let Ok(port) = env::var("HTTP_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(level) = env::var("HTTP_LOG_LEVEL") {
            if let Ok(level) = level.parse() {
                config.log_level = level;
            }
        }

        config
    }

    /// The composed listen address, `host:port`.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
