//! Session authentication client.
//!
//! DESIGN
//! ======
//! Logs in against a remote authentication API in two sequential calls
//! (credentials → access token, token → profile) and keeps the resulting
//! session in process memory. A [`SessionAuthClient`] is constructed once and
//! cloned into whichever components need authentication status; clones share
//! the same session.
//!
//! The remote API sits behind the [`AuthApi`] trait so the HTTP transport can
//! be swapped for a mock in tests.

pub mod api;
pub mod config;
pub mod error;
pub mod session;
pub mod types;

pub use api::{AuthApi, HttpAuthApi};
pub use config::AuthConfig;
pub use error::{AuthError, AuthErrorKind, ConfigError, UNKNOWN_ERROR_MESSAGE};
pub use session::{AuthenticatedSignal, SessionAuthClient, SessionState};
pub use types::{AccessToken, AuthenticatedUser, Credentials, LoginResult};
