//! Environment configuration
//!
//! Values come from the process environment, after `.env` has been loaded.
//! Unparseable values fall back to their defaults with a warning.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;
use trackline_domain::tracking::ValidationMode;
use trackline_mongo::MongoSettings;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_PROBE_INTERVAL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo: MongoSettings,
    /// Zero retries until the first successful ping, then stops checking
    pub probe_interval: Duration,
    pub validation: ValidationMode,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = MongoSettings::default();

        let uri = lookup("MONGO_URI").unwrap_or_else(|| {
            warn!(default = %defaults.uri, "MONGO_URI not set, using default");
            defaults.uri.clone()
        });

        let mongo = MongoSettings {
            uri,
            database: lookup("MONGO_DATABASE").unwrap_or_else(|| defaults.database.clone()),
            collection: lookup("MONGO_COLLECTION").unwrap_or_else(|| defaults.collection.clone()),
            server_selection_timeout: millis_or(
                &lookup,
                "MONGO_SERVER_SELECTION_TIMEOUT_MS",
                defaults.server_selection_timeout,
            ),
            idle_timeout: millis_or(&lookup, "MONGO_IDLE_TIMEOUT_MS", defaults.idle_timeout),
            connect_timeout: millis_or(
                &lookup,
                "MONGO_CONNECT_TIMEOUT_MS",
                defaults.connect_timeout,
            ),
            retry_writes: parse_or(&lookup, "MONGO_RETRY_WRITES", defaults.retry_writes),
            app_name: Some(env!("CARGO_PKG_NAME").to_string()),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", DEFAULT_PORT),
            mongo,
            probe_interval: Duration::from_secs(parse_or(
                &lookup,
                "STORE_PROBE_INTERVAL_SECS",
                DEFAULT_PROBE_INTERVAL_SECS,
            )),
            validation: parse_or(&lookup, "TRACKER_VALIDATION", ValidationMode::Presence),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = ?default, "Invalid value, using default");
            default
        }),
    }
}

fn millis_or(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: Duration) -> Duration {
    Duration::from_millis(parse_or(lookup, key, default.as_millis() as u64))
}
