//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::planner::ResolverConfig;

/// Error in a configuration value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has invalid value {value:?}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// Everything the binary needs to start.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Dataset file, used when no remote URL is set.
    pub data_file: PathBuf,
    /// Admin service export base URL; takes precedence over `data_file`.
    pub data_url: Option<String>,
    pub data_api_key: Option<String>,
    pub bind_addr: SocketAddr,
    pub static_dir: String,
    /// `None` disables periodic refresh.
    pub refresh_interval: Option<Duration>,
    /// Currency label for numeric fares.
    pub currency: String,
    pub resolver: ResolverConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/dataset.json"),
            data_url: None,
            data_api_key: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: "static".to_string(),
            refresh_interval: Some(Duration::from_secs(3600)),
            currency: "جنيه".to_string(),
            resolver: ResolverConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read the configuration through `lookup`; unset and blank variables
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = get("ROUTE_DATA_FILE") {
            config.data_file = PathBuf::from(path);
        }
        config.data_url = get("ROUTE_DATA_URL");
        config.data_api_key = get("ROUTE_DATA_API_KEY");
        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = parse("BIND_ADDR", &addr)?;
        }
        if let Some(dir) = get("STATIC_DIR") {
            config.static_dir = dir;
        }
        if let Some(secs) = get("REFRESH_INTERVAL_SECS") {
            let secs: u64 = parse("REFRESH_INTERVAL_SECS", &secs)?;
            config.refresh_interval = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(currency) = get("FARE_CURRENCY") {
            config.currency = currency.trim().to_string();
        }
        if let Some(score) = get("ROUTE_MIN_SCORE") {
            let score: f64 = parse("ROUTE_MIN_SCORE", &score)?;
            if !(0.0..=1.0).contains(&score) {
                return Err(ConfigError::Invalid {
                    var: "ROUTE_MIN_SCORE",
                    value: score.to_string(),
                    reason: "must be between 0 and 1".to_string(),
                });
            }
            config.resolver.min_score = score;
        }
        if let Some(n) = get("ROUTE_MAX_TRANSFERS") {
            config.resolver.max_transfers = parse("ROUTE_MAX_TRANSFERS", &n)?;
        }

        Ok(config)
    }
}

fn parse<T>(var: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
