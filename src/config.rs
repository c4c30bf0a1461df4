//! Process settings loaded once at startup.
//!
//! Values come from the environment (the binary loads a `.env` file first).
//! Variable names are matched case-insensitively.

use std::fmt;

use tracing::{debug, error};

use crate::backend::GeminiModel;
use crate::error::{CineInfoError, Result};

pub const API_KEY_VAR: &str = "GOOGLE_API_KEY";
pub const MODEL_VAR: &str = "GOOGLE_API_MODEL";
pub const BASE_URL_VAR: &str = "GOOGLE_API_BASE_URL";
pub const HOST_VAR: &str = "CINEINFO_HOST";
pub const PORT_VAR: &str = "CINEINFO_PORT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Immutable service configuration.
#[derive(Clone)]
pub struct Settings {
    /// Google AI Studio API key
    pub api_key: String,
    /// Gemini model used for every lookup
    pub model: GeminiModel,
    /// Override for the Gemini REST root, mainly for local mocks
    pub base_url: Option<String>,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Settings {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CineInfoError::ConfigError` if `GOOGLE_API_KEY` or
    /// `GOOGLE_API_MODEL` is not set, or if `CINEINFO_PORT` is not a port number.
    pub fn from_env() -> Result<Self> {
        // Variables that are not valid UTF-8 cannot be ours; skip them
        let vars: Vec<(String, String)> = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)))
            .collect();
        Self::from_lookup(|key| {
            vars.iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| value.clone())
        })
    }

    /// Load settings through an arbitrary key lookup.
    ///
    /// ```
    /// use cineinfo::Settings;
    ///
    /// let settings = Settings::from_lookup(|key| match key {
    ///     "GOOGLE_API_KEY" => Some("secret".to_string()),
    ///     "GOOGLE_API_MODEL" => Some("gemini-2.0-flash".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(settings.port, 5000);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required(&lookup, API_KEY_VAR)?;
        let model = GeminiModel::from_string(required(&lookup, MODEL_VAR)?);
        let base_url = lookup(BASE_URL_VAR).filter(|url| !url.is_empty());
        let host = lookup(HOST_VAR).unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = match lookup(PORT_VAR) {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                error!(value = %raw, error = %e, "Invalid {}", PORT_VAR);
                CineInfoError::ConfigError(format!("{} must be a port number: {}", PORT_VAR, e))
            })?,
            None => DEFAULT_PORT,
        };

        debug!(
            model = %model.as_str(),
            base_url = ?base_url,
            host = %host,
            port,
            "Loaded settings"
        );

        Ok(Self {
            api_key,
            model,
            base_url,
            host,
            port,
        })
    }

    /// Address the HTTP server binds to, as `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).ok_or_else(|| {
        error!("{} environment variable is not set", key);
        CineInfoError::ConfigError(format!("{} environment variable is not set", key))
    })
}
