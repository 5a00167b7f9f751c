//! Runtime configuration from environment variables, with defaults.
//!
//! HOST (default 0.0.0.0), PORT (8080), DRAW_QUOTA (16), ROSTER_IDLE_SECS (12h).

use crate::logic::DEFAULT_QUOTA;
use std::time::Duration;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Participants drawn per event.
    pub quota: usize,
    /// Cached rosters not refreshed for this long are evicted.
    pub roster_idle_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_quota() -> usize {
    DEFAULT_QUOTA
}

fn default_roster_idle_secs() -> u64 {
    12 * 3600
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            quota: default_quota(),
            roster_idle_secs: default_roster_idle_secs(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unparseable values fall back to the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(default_host);
        let port = parse_or("PORT", &lookup, default_port(), |_| true);
        let quota = parse_or("DRAW_QUOTA", &lookup, default_quota(), |q| *q >= 1);
        let roster_idle_secs = parse_or("ROSTER_IDLE_SECS", &lookup, default_roster_idle_secs(), |_| true);
        Self {
            host,
            port,
            quota,
            roster_idle_secs,
        }
    }

    pub fn roster_idle(&self) -> Duration {
        Duration::from_secs(self.roster_idle_secs)
    }
}

fn parse_or<T: std::str::FromStr + std::fmt::Display>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
    valid: impl Fn(&T) -> bool,
) -> T {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<T>() {
        Ok(v) if valid(&v) => v,
        _ => {
            log::warn!("Ignoring invalid {}={:?}, using {}", key, raw, default);
            default
        }
    }
}
