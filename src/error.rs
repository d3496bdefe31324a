//! Error types for login and configuration.
//!
//! ERROR HANDLING
//! ==============
//! `AuthError` covers everything that can go wrong during a login attempt.
//! Callers of `SessionAuthClient::login` never see it directly: it is
//! collapsed into `LoginResult::error_message`. `ConfigError` is a startup
//! error and is surfaced before any client exists.

/// Message used when a failure carries no usable description.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Coarse classification of a login failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// The transport or the remote service reported a describable failure.
    TransportOrService,
    /// Anything else.
    Unknown,
}

/// A failed call to the authentication API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The request could not be sent or its body could not be read.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Service { status: u16, message: String },

    /// The service answered 2xx with a body of the wrong shape.
    #[error("{0}")]
    Decode(String),

    #[error("An unknown error occurred")]
    Unknown,
}

impl AuthError {
    #[must_use]
    pub fn kind(&self) -> AuthErrorKind {
        match self {
            Self::Transport(_) | Self::Service { .. } | Self::Decode(_) => AuthErrorKind::TransportOrService,
            Self::Unknown => AuthErrorKind::Unknown,
        }
    }

    /// Human-readable description of the failure. Never empty.
    #[must_use]
    pub fn message(&self) -> String {
        let text = self.to_string();
        if text.trim().is_empty() { UNKNOWN_ERROR_MESSAGE.to_owned() } else { text }
    }

    /// HTTP status returned by the service, if the failure was a rejection.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Invalid or unusable configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL in {var}: {value}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("invalid value for {var}: {value} (expected a positive integer)")]
    InvalidNumber { var: &'static str, value: String },

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
