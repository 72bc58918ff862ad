// src/config.rs
use log::warn;
use std::env;
use std::str::FromStr;

pub const DEFAULT_PORT: u16 = 3030;
pub const DEFAULT_FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";
pub const DEFAULT_EARNINGS_WINDOW_DAYS: i64 = 14;
pub const MAX_EARNINGS_WINDOW_DAYS: i64 = 366;
pub const DEFAULT_CACHE_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// Absent keys are allowed; lookups then fail soft.
    pub fmp_api_key: Option<String>,
    pub fmp_base_url: String,
    pub earnings_window_days: i64,
    pub cache_ttl_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            port: DEFAULT_PORT,
            fmp_api_key: None,
            fmp_base_url: DEFAULT_FMP_BASE_URL.to_string(),
            earnings_window_days: DEFAULT_EARNINGS_WINDOW_DAYS,
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up `.env`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let port = match lookup("PORT") {
            Some(raw) => parse_or(&raw, "PORT", defaults.port),
            None => {
                warn!("$PORT not set, defaulting to {}", defaults.port);
                defaults.port
            }
        };

        let fmp_api_key = lookup("FMP_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        if fmp_api_key.is_none() {
            warn!("FMP_API_KEY is not set; earnings and profile lookups will return no data");
        }

        let fmp_base_url = lookup("FMP_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or(defaults.fmp_base_url);

        let earnings_window_days = match lookup("EARNINGS_WINDOW_DAYS") {
            Some(raw) => {
                let days = parse_or(&raw, "EARNINGS_WINDOW_DAYS", defaults.earnings_window_days);
                if days < 0 {
                    warn!("EARNINGS_WINDOW_DAYS must not be negative, using default");
                    defaults.earnings_window_days
                } else if days > MAX_EARNINGS_WINDOW_DAYS {
                    warn!(
                        "EARNINGS_WINDOW_DAYS {} is too large, capping at {}",
                        days, MAX_EARNINGS_WINDOW_DAYS
                    );
                    MAX_EARNINGS_WINDOW_DAYS
                } else {
                    days
                }
            }
            None => defaults.earnings_window_days,
        };

        let cache_ttl_secs = lookup("CACHE_TTL_SECS")
            .map(|raw| parse_or(&raw, "CACHE_TTL_SECS", defaults.cache_ttl_secs))
            .unwrap_or(defaults.cache_ttl_secs);

        AppConfig {
            port,
            fmp_api_key,
            fmp_base_url,
            earnings_window_days,
            cache_ttl_secs,
        }
    }
}

fn parse_or<T: FromStr + Copy + std::fmt::Display>(raw: &str, name: &str, default: T) -> T {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("{} has invalid value {:?}, defaulting to {}", name, raw, default);
        default
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, 3030);
        assert_eq!(config.fmp_api_key, None);
        assert_eq!(config.fmp_base_url, DEFAULT_FMP_BASE_URL);
        assert_eq!(config.earnings_window_days, 14);
        assert_eq!(config.cache_ttl_secs, 3600);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("FMP_API_KEY", " secret "),
            ("FMP_BASE_URL", "http://localhost:9000/stable/"),
            ("EARNINGS_WINDOW_DAYS", "30"),
            ("CACHE_TTL_SECS", "0"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.fmp_api_key.as_deref(), Some("secret"));
        assert_eq!(config.fmp_base_url, "http://localhost:9000/stable");
        assert_eq!(config.earnings_window_days, 30);
        assert_eq!(config.cache_ttl_secs, 0);
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("FMP_API_KEY", "   "),
            ("EARNINGS_WINDOW_DAYS", "-3"),
        ]);
        assert_eq!(config.port, 3030);
        assert_eq!(config.fmp_api_key, None);
        assert_eq!(config.earnings_window_days, 14);
    }

    #[test]
    fn oversized_window_is_capped() {
        let config = config_from(&[("EARNINGS_WINDOW_DAYS", "200000000000")]);
        assert_eq!(config.earnings_window_days, MAX_EARNINGS_WINDOW_DAYS);

        let config = config_from(&[("EARNINGS_WINDOW_DAYS", "366")]);
        assert_eq!(config.earnings_window_days, 366);
    }
}
