use std::env;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_DIRECTORY_SOURCE_URL: &str =
    "https://srijandubey.github.io/campus-api-mock/SRM-C1-25.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 3;
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory_source_url: String,
    /// `0` disables the timeout.
    pub fetch_timeout_secs: u64,
    pub suggestion_limit: usize,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            directory_source_url: DEFAULT_DIRECTORY_SOURCE_URL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            suggestion_limit: DEFAULT_SUGGESTION_LIMIT,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            directory_source_url: env::var("DIRECTORY_SOURCE_URL")
                .unwrap_or_else(|_| {
                    warn!("DIRECTORY_SOURCE_URL not set, using default");
                    DEFAULT_DIRECTORY_SOURCE_URL.to_string()
                }),
            fetch_timeout_secs: parse_var("DIRECTORY_FETCH_TIMEOUT_SECS", DEFAULT_FETCH_TIMEOUT_SECS),
            suggestion_limit: non_zero_or_default(
                "SUGGESTION_LIMIT",
                parse_var("SUGGESTION_LIMIT", DEFAULT_SUGGESTION_LIMIT),
                DEFAULT_SUGGESTION_LIMIT,
            ),
            port: parse_var("PORT", DEFAULT_PORT),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - directory source URL is empty");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.directory_source_url.trim().is_empty()
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        match self.fetch_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("{} has invalid value '{}', using default {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn non_zero_or_default(name: &str, value: usize, default: usize) -> usize {
    if value == 0 {
        warn!("{} must be at least 1, using default {}", name, default);
        default
    } else {
        value
    }
}
