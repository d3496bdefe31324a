//! Values exchanged with the authentication API and returned to callers.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AuthError;

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Login input. Sent once as the login request body and not retained.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

// =============================================================================
// ACCESS TOKEN
// =============================================================================

/// Bearer token issued by the login endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

// =============================================================================
// AUTHENTICATED USER
// =============================================================================

/// Profile returned by the profile endpoint, stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthenticatedUser(Value);

impl AuthenticatedUser {
    #[must_use]
    pub fn new(profile: Value) -> Self {
        Self(profile)
    }

    /// Look up a top-level field of the profile.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}

// =============================================================================
// LOGIN RESULT
// =============================================================================

/// Outcome of `SessionAuthClient::login`.
///
/// Serializes as `{"success": bool, "errorMessage": string}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResult {
    pub success: bool,
    pub error_message: String,
}

impl LoginResult {
    #[must_use]
    pub fn succeeded() -> Self {
        Self { success: true, error_message: String::new() }
    }

    #[must_use]
    pub fn failed(err: &AuthError) -> Self {
        Self { success: false, error_message: err.message() }
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
