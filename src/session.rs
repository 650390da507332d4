//! In-memory session store.
//!
//! A session is either signed out or signed in with both a token and a
//! user; there is no state holding only one of them. Nothing is persisted
//! and the token is never validated locally: an expired token only shows up
//! when a call using it fails.

use tracing::{info, warn};

use crate::error::{FlixApiError, Result};
use crate::models::{AuthResponse, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn { token: String, user: User },
}

impl Session {
    pub fn token(&self) -> Option<&str> {
        match self {
            Session::SignedOut => None,
            Session::SignedIn { token, .. } => Some(token),
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            Session::SignedOut => None,
            Session::SignedIn { user, .. } => Some(user),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self, Session::SignedIn { .. })
    }
}

/// A blank token is not a session; it never becomes `SignedIn`.
impl TryFrom<AuthResponse> for Session {
    type Error = FlixApiError;

    fn try_from(auth: AuthResponse) -> Result<Self> {
        if auth.token.trim().is_empty() {
            return Err(FlixApiError::without_status("Missing session token"));
        }
        Ok(Session::SignedIn {
            token: auth.token,
            user: auth.user,
        })
    }
}

/// Holds the current [`Session`] for the lifetime of the application.
#[derive(Debug, Default)]
pub struct SessionStore {
    current: Session,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.current
    }

    pub fn token(&self) -> Option<&str> {
        self.current.token()
    }

    pub fn user(&self) -> Option<&User> {
        self.current.user()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_signed_in()
    }

    /// Replace the session with the one returned by login or register.
    ///
    /// A response without a token is rejected and the current session is
    /// left as it was.
    pub fn sign_in(&mut self, auth: AuthResponse) -> Result<()> {
        let user_id = auth.user.id;
        match Session::try_from(auth) {
            Ok(session) => {
                info!(user_id, "session started");
                self.current = session;
                Ok(())
            }
            Err(e) => {
                warn!(user_id, "auth response carried no token");
                Err(e)
            }
        }
    }

    pub fn sign_out(&mut self) {
        if self.current.is_signed_in() {
            info!("session ended");
        }
        self.current = Session::SignedOut;
    }
}
