//! Server configuration and environment variable handling.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::format::NumberLocale;

/// HTTP server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Digit grouping used for every formatted figure
    pub locale: NumberLocale,
    /// Overall bound on lookup plus readiness, if any
    pub load_deadline: Option<Duration>,
    /// How long settled background sessions stay readable
    pub session_retention: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            locale: NumberLocale::EnUs,
            load_deadline: Some(Duration::from_secs(60)),
            session_retention: Duration::from_secs(300),
        }
    }
}

impl ServerConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `HOST` (optional, default: 0.0.0.0)
    /// - `PORT` (optional, default: 8080)
    /// - `NUMBER_LOCALE` (optional, default: en-US)
    /// - `LOAD_DEADLINE_SECS` (optional, default: 60, `0` disables the deadline)
    /// - `SESSION_RETENTION_SECS` (optional, default: 300)
    ///
    /// # Errors
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|name| env::var(name).ok())
    }

    pub fn from_vars<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| "PORT must be a valid port number".to_string())?,
            None => defaults.port,
        };

        let load_deadline = match var("LOAD_DEADLINE_SECS") {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    return Err(format!(
                        "LOAD_DEADLINE_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                }
            },
            None => defaults.load_deadline,
        };

        let session_retention = match var("SESSION_RETENTION_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map(Duration::from_secs).map_err(|_| {
                format!(
                    "SESSION_RETENTION_SECS must be a whole number of seconds, got '{}'",
                    raw
                )
            })?,
            None => defaults.session_retention,
        };

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            locale: var("NUMBER_LOCALE")
                .map(|tag| NumberLocale::from_tag(&tag))
                .unwrap_or(defaults.locale),
            load_deadline,
            session_retention,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("Invalid bind address {}:{}: {}", self.host, self.port, e))
    }
}
