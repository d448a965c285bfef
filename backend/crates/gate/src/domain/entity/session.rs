//! Session Entity
//!
//! Tokens issued by the auth service. Opaque to this service: they are
//! stored in cookies and handed back to the auth service, never decoded.

use std::time::Duration;

use crate::domain::entity::auth_user::AuthUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime, when the service reports one
    pub expires_in: Option<Duration>,
    pub user: AuthUser,
}

/// Result of a sign-up request
///
/// The auth service either waits for email confirmation or, when
/// confirmation is disabled, signs the user in right away.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpOutcome {
    ConfirmationSent(AuthUser),
    SignedIn(Session),
}

impl SignUpOutcome {
    pub fn user(&self) -> &AuthUser {
        match self {
            SignUpOutcome::ConfirmationSent(user) => user,
            SignUpOutcome::SignedIn(session) => &session.user,
        }
    }
}
