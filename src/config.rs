//! Runtime settings read from the environment (and an optional `.env`).
//!
//! | variable                  | default          |
//! |---------------------------|------------------|
//! | `SENTI_DOWNLOAD_DIR`      | `<tmp>/senti`    |
//! | `SENTI_HTTP_TIMEOUT_SECS` | `30`             |
//! | `SENTI_CACHE_TTL_SECS`    | unset (no expiry)|

use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Settings {
    /// Where remote CSVs are written before parsing.
    pub download_dir: PathBuf,
    pub http_timeout: Duration,
    /// Cache entry lifetime; `None` keeps entries until cleared.
    pub cache_ttl: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_dir: std::env::temp_dir().join("senti"),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            cache_ttl: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build settings from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Settings::default();

        if let Some(dir) = lookup("SENTI_DOWNLOAD_DIR").filter(|s| !s.trim().is_empty()) {
            settings.download_dir = PathBuf::from(dir.trim());
        }
        if let Some(secs) = parse_secs(&lookup, "SENTI_HTTP_TIMEOUT_SECS") {
            settings.http_timeout = Duration::from_secs(secs);
        }
        settings.cache_ttl = parse_secs(&lookup, "SENTI_CACHE_TTL_SECS").map(Duration::from_secs);

        settings
    }
}

fn parse_secs(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("ignoring {name}={raw:?}: expected a whole number of seconds");
            None
        }
    }
}
