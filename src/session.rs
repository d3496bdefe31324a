//! In-memory session and the client that drives it.
//!
//! DESIGN
//! ======
//! The session lives in a `tokio::sync::watch` channel owned by the client.
//! `login` writes it only after both remote calls succeed, replacing the
//! whole `SessionState` at once so `authenticated` and `current_user` never
//! disagree. `logout` replaces it with the logged-out state.
//!
//! No lock is held while a login is in flight. Concurrent logins each run to
//! completion independently and the last one to finish determines the
//! session.
//!
//! Observers subscribe through `AuthenticatedSignal`, which only reports
//! transitions of the `authenticated` flag.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{AuthApi, HttpAuthApi};
use crate::config::AuthConfig;
use crate::error::{AuthError, ConfigError};
use crate::types::{AuthenticatedUser, Credentials, LoginResult};

// =============================================================================
// SESSION STATE
// =============================================================================

/// Snapshot of the session. A user is present exactly when authenticated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    current_user: Option<AuthenticatedUser>,
}

impl SessionState {
    #[must_use]
    pub fn logged_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn logged_in(user: AuthenticatedUser) -> Self {
        Self { current_user: Some(user) }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<&AuthenticatedUser> {
        self.current_user.as_ref()
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Authentication client holding the process's session.
///
/// Cloning is cheap; clones share the same session.
#[derive(Clone)]
pub struct SessionAuthClient {
    api: Arc<dyn AuthApi>,
    session: Arc<watch::Sender<SessionState>>,
}

impl SessionAuthClient {
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>) -> Self {
        let (session, _) = watch::channel(SessionState::logged_out());
        Self { api, session: Arc::new(session) }
    }

    /// Build a client talking HTTP to the configured endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        Ok(Self::new(Arc::new(HttpAuthApi::new(config)?)))
    }

    /// Log in and report the outcome as a value. Never fails.
    ///
    /// On success the session becomes authenticated with the fetched profile.
    /// On failure the session is left exactly as it was.
    pub async fn login(&self, email: &str, password: &str) -> LoginResult {
        match self.try_login(&Credentials::new(email, password)).await {
            Ok(()) => LoginResult::succeeded(),
            Err(e) => LoginResult::failed(&e),
        }
    }

    /// Log in, keeping the structured error on failure.
    ///
    /// # Errors
    ///
    /// Returns the [`AuthError`] from whichever remote call failed. The
    /// session is not modified in that case.
    pub async fn try_login(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let user = match self.authenticate(credentials).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), status = ?e.status(), error = %e.message(), "login failed");
                return Err(e);
            }
        };
        let was_authenticated = self.session.send_replace(SessionState::logged_in(user)).is_authenticated();
        tracing::info!(replaced_session = was_authenticated, "login succeeded");
        Ok(())
    }

    async fn authenticate(&self, credentials: &Credentials) -> Result<AuthenticatedUser, AuthError> {
        let token = self.api.login(credentials).await?;
        self.api.fetch_profile(&token).await
    }

    /// Clear the session. Idempotent.
    pub fn logout(&self) {
        let cleared = self.session.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = SessionState::logged_out();
                true
            } else {
                false
            }
        });
        if cleared {
            tracing::info!("logged out");
        } else {
            tracing::debug!("logout with no active session");
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().is_authenticated()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<AuthenticatedUser> {
        self.session.borrow().current_user().cloned()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.session.borrow().clone()
    }

    /// Subscribe to changes of the authenticated flag.
    #[must_use]
    pub fn authenticated(&self) -> AuthenticatedSignal {
        AuthenticatedSignal::new(self.session.subscribe())
    }
}

// =============================================================================
// SIGNAL
// =============================================================================

/// Read-only view of the authenticated flag.
pub struct AuthenticatedSignal {
    rx: watch::Receiver<SessionState>,
    seen: bool,
}

impl AuthenticatedSignal {
    fn new(mut rx: watch::Receiver<SessionState>) -> Self {
        let seen = rx.borrow_and_update().is_authenticated();
        Self { rx, seen }
    }

    #[must_use]
    pub fn get(&self) -> bool {
        self.rx.borrow().is_authenticated()
    }

    /// Wait for the flag to flip and return its new value.
    ///
    /// Session updates that leave the flag unchanged (a second login while
    /// already authenticated) are skipped. Returns `None` once every client
    /// handle has been dropped.
    pub async fn changed(&mut self) -> Option<bool> {
        loop {
            self.rx.changed().await.ok()?;
            let now = self.rx.borrow_and_update().is_authenticated();
            if now != self.seen {
                self.seen = now;
                return Some(now);
            }
        }
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
