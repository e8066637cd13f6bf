use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://meme-gen-api.vercel.app";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(String),
    #[error("Invalid environment variable format for {0}: {1}")]
    InvalidVar(String, String),
}

#[derive(Clone, Debug)] // Clone so the app can hand it to each view it mounts
pub struct Config {
    /// Base URL of the remote meme API, without a trailing slash.
    pub api_base_url: String,
    /// Serve the bundled sample memes instead of calling the API.
    pub offline: bool,
    pub countdown_start: Duration,
    pub countdown_reset: Duration,
    pub countdown_tick: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignores errors, relies on env vars otherwise)
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_base =
            lookup("MEME_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = raw_base.trim().trim_end_matches('/').to_string();
        if api_base_url.is_empty() {
            return Err(ConfigError::MissingVar("MEME_API_BASE_URL".into()));
        }
        reqwest::Url::parse(&api_base_url)
            .map_err(|e| ConfigError::InvalidVar("MEME_API_BASE_URL".into(), e.to_string()))?;

        let offline = match lookup("MEME_OFFLINE") {
            Some(value) => parse_flag("MEME_OFFLINE", &value)?,
            None => false,
        };

        let start_secs: u64 = parse_or("COUNTDOWN_START_SECS", &lookup, 2 * 3600 + 30 * 60)?;
        let countdown_start = Duration::from_secs(start_secs);

        let reset_secs: u64 = parse_or("COUNTDOWN_RESET_SECS", &lookup, 3 * 3600)?;
        if reset_secs == 0 {
            return Err(ConfigError::InvalidVar(
                "COUNTDOWN_RESET_SECS".into(),
                "must be greater than zero".into(),
            ));
        }

        let tick_ms: u64 = parse_or("COUNTDOWN_TICK_MS", &lookup, 1000)?;
        if tick_ms == 0 {
            return Err(ConfigError::InvalidVar(
                "COUNTDOWN_TICK_MS".into(),
                "must be greater than zero".into(),
            ));
        }

        Ok(Config {
            api_base_url,
            offline,
            countdown_start,
            countdown_reset: Duration::from_secs(reset_secs),
            countdown_tick: Duration::from_millis(tick_ms),
        })
    }
}

fn parse_or<T, F>(key: &str, lookup: &F, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidVar(key.into(), e.to_string())),
        None => Ok(default),
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidVar(
            key.into(),
            format!("expected a boolean, got '{}'", other),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(!config.offline);
        assert_eq!(config.countdown_start, Duration::from_secs(9000));
        assert_eq!(config.countdown_reset, Duration::from_secs(10800));
        assert_eq!(config.countdown_tick, Duration::from_secs(1));
    }

    #[test]
    fn trims_trailing_slashes_from_base_url() {
        let lookup = lookup_from(&[("MEME_API_BASE_URL", "http://localhost:4000//")]);
        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:4000");
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let lookup = lookup_from(&[("MEME_API_BASE_URL", "not a url")]);
        let err = Config::from_lookup(lookup).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar(key, _) if key == "MEME_API_BASE_URL"));
    }

    #[test]
    fn rejects_zero_reset() {
        let err = Config::from_lookup(lookup_from(&[("COUNTDOWN_RESET_SECS", "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar(key, _) if key == "COUNTDOWN_RESET_SECS"));
    }

    #[test]
    fn parses_offline_flag() {
        let config = Config::from_lookup(lookup_from(&[("MEME_OFFLINE", "TRUE")])).unwrap();
        assert!(config.offline);

        let err = Config::from_lookup(lookup_from(&[("MEME_OFFLINE", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidVar(..)));
    }
}
