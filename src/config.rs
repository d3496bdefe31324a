//! Authentication API configuration parsed from environment variables.

use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_AUTH_API_BASE_URL: &str = "https://api.escuelajs.co/api/v1";
pub const DEFAULT_LOGIN_PATH: &str = "/auth/login";
pub const DEFAULT_PROFILE_PATH: &str = "/auth/profile";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Endpoint that exchanges credentials for an access token.
    pub login_url: String,
    /// Endpoint that returns the profile for a bearer token.
    pub profile_url: String,
    /// Per-request timeout. `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_url: format!("{DEFAULT_AUTH_API_BASE_URL}{DEFAULT_LOGIN_PATH}"),
            profile_url: format!("{DEFAULT_AUTH_API_BASE_URL}{DEFAULT_PROFILE_PATH}"),
            request_timeout: None,
        }
    }
}

impl AuthConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `AUTH_API_BASE_URL`: default `https://api.escuelajs.co/api/v1`
    /// - `AUTH_LOGIN_PATH`: default `/auth/login`
    /// - `AUTH_PROFILE_PATH`: default `/auth/profile`
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: unset means no client-imposed timeout
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute URL or the timeout
    /// is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`AuthConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup("AUTH_API_BASE_URL").unwrap_or_else(|| DEFAULT_AUTH_API_BASE_URL.to_owned());
        let base_url = base_url.trim().trim_end_matches('/').to_owned();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(ConfigError::InvalidUrl { var: "AUTH_API_BASE_URL", value: base_url });
        }

        let login_path = lookup("AUTH_LOGIN_PATH").unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_owned());
        let profile_path = lookup("AUTH_PROFILE_PATH").unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_owned());

        let request_timeout = match lookup("AUTH_REQUEST_TIMEOUT_SECS") {
            None => None,
            Some(raw) => Some(parse_timeout("AUTH_REQUEST_TIMEOUT_SECS", &raw)?),
        };

        Ok(Self {
            login_url: join_url(&base_url, &login_path),
            profile_url: join_url(&base_url, &profile_path),
            request_timeout,
        })
    }
}

fn join_url(base: &str, path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') { format!("{base}{path}") } else { format!("{base}/{path}") }
}

fn parse_timeout(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidNumber { var, value: raw.to_owned() }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
