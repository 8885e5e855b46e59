//! Solar service configuration and environment variable handling.

use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default endpoint of the Google Solar API.
pub const DEFAULT_BASE_URL: &str = "https://solar.googleapis.com";

/// Default satellite tile used to confirm imagery is available.
pub const DEFAULT_IMAGERY_URL_TEMPLATE: &str = "https://maps.googleapis.com/maps/api/staticmap?center={lat},{lng}&zoom=20&size=640x640&maptype=satellite&key={key}";

/// Which building lookup implementation to wire up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolarBackend {
    /// Google Solar API over HTTP.
    Google,
    /// In-memory fixtures, no network access.
    Local,
}

impl FromStr for SolarBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "local" | "memory" => Ok(Self::Local),
            other => Err(format!(
                "Unsupported SOLAR_BACKEND '{}'. Use google or local.",
                other
            )),
        }
    }
}

impl SolarBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolarBackend::Google => "google",
            SolarBackend::Local => "local",
        }
    }
}

/// Solar service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SolarConfig {
    pub backend: SolarBackend,
    /// Base URL of the building insights API
    pub base_url: String,
    /// Minimum imagery quality accepted by the lookup (`LOW`, `MEDIUM`, `HIGH`)
    pub required_quality: String,
    /// Per-request timeout for both lookup and readiness calls
    pub timeout: Duration,
    /// Imagery URL with `{lat}`, `{lng}` and `{key}` placeholders
    pub imagery_url_template: String,
    /// Key substituted for `{key}` in the imagery template. Empty means the
    /// tenant's gateway key is used.
    pub imagery_key: String,
    /// How many times the readiness probe polls before giving up
    pub readiness_attempts: u32,
    /// Pause between readiness polls
    pub readiness_delay: Duration,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            base_url: DEFAULT_BASE_URL.to_string(),
            required_quality: "LOW".to_string(),
            timeout: Duration::from_secs(20),
            imagery_url_template: DEFAULT_IMAGERY_URL_TEMPLATE.to_string(),
            imagery_key: String::new(),
            readiness_attempts: 5,
            readiness_delay: Duration::from_millis(500),
        }
    }
}

fn default_backend() -> SolarBackend {
    if cfg!(feature = "google-solar") {
        SolarBackend::Google
    } else {
        SolarBackend::Local
    }
}

impl SolarConfig {
    /// Create a configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `SOLAR_BACKEND` (optional): `google` | `local`
    /// - `SOLAR_API_BASE_URL` (optional, default: `https://solar.googleapis.com`)
    /// - `SOLAR_REQUIRED_QUALITY` (optional, default: `LOW`)
    /// - `SOLAR_TIMEOUT_SECS` (optional, default: 20)
    /// - `SOLAR_IMAGERY_URL_TEMPLATE` (optional): static map URL template
    /// - `SOLAR_IMAGERY_KEY` (optional): imagery key overriding the tenant key
    /// - `SOLAR_READINESS_ATTEMPTS` (optional, default: 5)
    /// - `SOLAR_READINESS_DELAY_MS` (optional, default: 500)
    ///
    /// # Errors
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`SolarConfig::from_env`] with an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend = match var("SOLAR_BACKEND") {
            Some(v) if !v.trim().is_empty() => v.parse()?,
            _ => defaults.backend,
        };

        if backend == SolarBackend::Google && !cfg!(feature = "google-solar") {
            return Err("SOLAR_BACKEND=google requires the google-solar feature".to_string());
        }

        let timeout_secs: u64 = parse_or(&var, "SOLAR_TIMEOUT_SECS", 20)?;
        if timeout_secs == 0 {
            return Err("SOLAR_TIMEOUT_SECS must be greater than zero".to_string());
        }
        let readiness_attempts: u32 = parse_or(&var, "SOLAR_READINESS_ATTEMPTS", 5)?;
        if readiness_attempts == 0 {
            return Err("SOLAR_READINESS_ATTEMPTS must be at least 1".to_string());
        }
        let readiness_delay_ms: u64 = parse_or(&var, "SOLAR_READINESS_DELAY_MS", 500)?;

        Ok(Self {
            backend,
            base_url: var("SOLAR_API_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.base_url),
            required_quality: var("SOLAR_REQUIRED_QUALITY")
                .map(|q| q.to_uppercase())
                .unwrap_or(defaults.required_quality),
            timeout: Duration::from_secs(timeout_secs),
            imagery_url_template: var("SOLAR_IMAGERY_URL_TEMPLATE")
                .unwrap_or(defaults.imagery_url_template),
            imagery_key: var("SOLAR_IMAGERY_KEY").unwrap_or_default(),
            readiness_attempts,
            readiness_delay: Duration::from_millis(readiness_delay_ms),
        })
    }
}

fn parse_or<F, T>(var: &F, name: &str, default: T) -> Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a valid number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = SolarConfig::from_vars(vars(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.required_quality, "LOW");
        assert_eq!(config.timeout, Duration::from_secs(20));
        assert_eq!(config.readiness_attempts, 5);
        assert_eq!(config.readiness_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_overrides() {
        let config = SolarConfig::from_vars(vars(&[
            ("SOLAR_BACKEND", "LOCAL"),
            ("SOLAR_API_BASE_URL", "http://localhost:9000/"),
            ("SOLAR_REQUIRED_QUALITY", "high"),
            ("SOLAR_TIMEOUT_SECS", "3"),
            ("SOLAR_READINESS_ATTEMPTS", "2"),
            ("SOLAR_READINESS_DELAY_MS", "10"),
        ]))
        .unwrap();
        assert_eq!(config.backend, SolarBackend::Local);
        assert_eq!(config.base_url, "http://localhost:9000");
        assert_eq!(config.required_quality, "HIGH");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.readiness_attempts, 2);
        assert_eq!(config.readiness_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_invalid_values() {
        assert!(SolarConfig::from_vars(vars(&[("SOLAR_BACKEND", "bing")])).is_err());
        assert!(SolarConfig::from_vars(vars(&[("SOLAR_TIMEOUT_SECS", "soon")])).is_err());
        assert!(SolarConfig::from_vars(vars(&[("SOLAR_TIMEOUT_SECS", "0")])).is_err());
        assert!(SolarConfig::from_vars(vars(&[("SOLAR_READINESS_ATTEMPTS", "0")])).is_err());
    }
}
