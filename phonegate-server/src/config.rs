//! Server configuration

use crate::fetcher::DEFAULT_PROFILE_URL;

#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,

    /// Endpoint returning one random profile
    pub profile_url: String,

    /// SQLite database for the session slot; in-memory when unset
    pub db_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            profile_url: DEFAULT_PROFILE_URL.to_string(),
            db_path: None,
        }
    }
}

impl Config {
    /// Create config from environment variables
    ///
    /// Optional:
    /// - PHONEGATE_PORT (default: 3000)
    /// - PHONEGATE_PROFILE_URL (default: randomuser.me)
    /// - PHONEGATE_DB_PATH
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from any variable source. Empty values count as unset.
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|s| !s.is_empty());
        let defaults = Self::default();

        let port = match get("PHONEGATE_PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "Ignoring invalid PHONEGATE_PORT");
                defaults.port
            }),
            None => defaults.port,
        };

        Self {
            port,
            profile_url: get("PHONEGATE_PROFILE_URL").unwrap_or(defaults.profile_url),
            db_path: get("PHONEGATE_DB_PATH"),
        }
    }
}
