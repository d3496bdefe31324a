//! Remote authentication API.
//!
//! DESIGN
//! ======
//! `AuthApi` is the seam between the session and the network. The session
//! only needs two calls: exchange credentials for a bearer token, then fetch
//! the profile that token belongs to. `HttpAuthApi` implements them over
//! `reqwest`; tests substitute their own implementations.
//!
//! No retries are attempted. A non-2xx status is turned into
//! `AuthError::Service` with the service's own message when the body carries
//! one.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::AuthConfig;
use crate::error::{AuthError, ConfigError};
use crate::types::{AccessToken, AuthenticatedUser, Credentials};

/// Calls made against the authentication service.
#[async_trait::async_trait]
pub trait AuthApi: Send + Sync {
    /// Submit credentials and receive an access token.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the request fails, the service rejects the
    /// credentials, or the response has no token.
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthError>;

    /// Fetch the profile of the user the token was issued to.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] if the request fails, the service rejects the
    /// token, or the response body is empty.
    async fn fetch_profile(&self, token: &AccessToken) -> Result<AuthenticatedUser, AuthError>;
}

#[derive(serde::Deserialize)]
struct TokenResponse {
    access_token: AccessToken,
}

// =============================================================================
// HTTP IMPLEMENTATION
// =============================================================================

pub struct HttpAuthApi {
    http: reqwest::Client,
    login_url: String,
    profile_url: String,
}

impl HttpAuthApi {
    /// Build an HTTP client for the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &AuthConfig) -> Result<Self, ConfigError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ConfigError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, login_url: config.login_url.clone(), profile_url: config.profile_url.clone() })
    }
}

#[async_trait::async_trait]
impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AccessToken, AuthError> {
        tracing::debug!(url = %self.login_url, "requesting access token");
        let response = self.http.post(&self.login_url).json(credentials).send().await?;
        let body: TokenResponse = read_json(response, "login response").await?;
        Ok(body.access_token)
    }

    async fn fetch_profile(&self, token: &AccessToken) -> Result<AuthenticatedUser, AuthError> {
        tracing::debug!(url = %self.profile_url, "fetching profile");
        let response = self
            .http
            .get(&self.profile_url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let profile: Value = read_json(response, "profile response").await?;
        if profile.is_null() {
            return Err(AuthError::Decode("profile response was empty".into()));
        }
        Ok(AuthenticatedUser::new(profile))
    }
}

// =============================================================================
// RESPONSE HANDLING
// =============================================================================

async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T, AuthError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(AuthError::Service { status: status.as_u16(), message: service_message(status, &text) });
    }
    serde_json::from_str(&text).map_err(|e| AuthError::Decode(format!("invalid {what}: {e}")))
}

/// Pick the most descriptive message a rejection carries.
///
/// Prefers the body's `message` (a string, or a list of strings), then its
/// `error` string, then the status reason phrase.
fn service_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value.get("message") {
            Some(Value::String(msg)) if !msg.trim().is_empty() => return msg.clone(),
            Some(Value::Array(items)) => {
                let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                if !parts.is_empty() {
                    return parts.join(", ");
                }
            }
            _ => {}
        }
        if let Some(Value::String(err)) = value.get("error") {
            if !err.trim().is_empty() {
                return err.clone();
            }
        }
    }
    status
        .canonical_reason()
        .map_or_else(|| format!("request failed with status {}", status.as_u16()), str::to_owned)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
