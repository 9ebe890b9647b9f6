//! Client configuration types.
//!
//! Configuration is read from a JSON file (by default
//! `<config_dir>/nylas-mail/config.json`, or the XDG equivalent) or from
//! `NYLAS_*` environment variables.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Environment variable names read by [`ClientConfig::from_env`].
pub mod env {
    pub const BASE_URL: &str = "NYLAS_BASE_URL";
    pub const CLIENT_ID: &str = "NYLAS_CLIENT_ID";
    pub const CLIENT_SECRET: &str = "NYLAS_CLIENT_SECRET";
    pub const CALLBACK_URL: &str = "NYLAS_CALLBACK_URL";
    pub const REQUEST_TIMEOUT_SECS: &str = "NYLAS_REQUEST_TIMEOUT_SECS";
}

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

/// Settings required by [`crate::NylasClient`].
///
/// `base_url`, `client_id`, `client_secret` and `callback_url` have no
/// defaults.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://api.us.nylas.com`.
    pub base_url: String,
    /// Application client ID.
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
    /// OAuth redirect URI registered for the application.
    pub callback_url: String,
    /// Per-request timeout applied by the default transport.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    pub fn new(
        base_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        callback_url: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            callback_url: callback_url.into(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Overrides the request timeout.
    ///
    /// The timeout is kept in whole seconds; any fractional part rounds up.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        let secs = timeout.as_secs();
        self.request_timeout_secs = if timeout.subsec_nanos() > 0 {
            secs.saturating_add(1)
        } else {
            secs
        };
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Default config file location, if a home directory can be determined.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "nylas", "nylas-mail")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Builds a config from `NYLAS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |key: &str| {
            lookup(key).ok_or_else(|| Error::Config(format!("{} is not set", key)))
        };

        let request_timeout_secs = match lookup(env::REQUEST_TIMEOUT_SECS) {
            Some(value) => value.parse::<u64>().map_err(|e| {
                Error::Config(format!("{}: {}", env::REQUEST_TIMEOUT_SECS, e))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        let config = Self {
            base_url: require(env::BASE_URL)?,
            client_id: require(env::CLIENT_ID)?,
            client_secret: require(env::CLIENT_SECRET)?,
            callback_url: require(env::CALLBACK_URL)?,
            request_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks that required values are present, the timeout is non-zero and
    /// the base URL is usable.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base_url", &self.base_url),
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("callback_url", &self.callback_url),
        ] {
            if value.trim().is_empty() {
                return Err(Error::Config(format!("{} must not be empty", name)));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(Error::Config(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }
        self.parsed_base_url()?;
        Ok(())
    }

    /// Parses `base_url`; only absolute http(s) URLs are accepted.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("invalid base_url {:?}: {}", self.base_url, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(Error::Config(format!(
                "base_url must use http or https, got {}",
                other
            ))),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
