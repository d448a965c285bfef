//! Service Traits
//!
//! Interfaces to the external auth service and to the profile store.
//! Implementations live in the infrastructure layer; tests substitute
//! in-memory fakes.

use kernel::id::UserId;

use crate::domain::entity::{auth_user::AuthUser, session::Session, session::SignUpOutcome};
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::GateResult;

/// External auth service
#[trait_variant::make(IdentityService: Send)]
pub trait LocalIdentityService {
    /// User behind an access token; `None` when the token is rejected
    async fn get_user(&self, access_token: &str) -> GateResult<Option<AuthUser>>;

    /// New token pair for a refresh token; `None` when the token is rejected
    async fn refresh_session(&self, refresh_token: &str) -> GateResult<Option<Session>>;

    async fn sign_in_with_password(&self, email: &Email, password: &Password)
    -> GateResult<Session>;

    /// Register with a PKCE challenge; the confirmation link lands on `redirect_to`
    async fn sign_up(
        &self,
        email: &Email,
        password: &Password,
        redirect_to: &str,
        code_challenge: &str,
    ) -> GateResult<SignUpOutcome>;

    /// Trade the callback's auth code and the stored verifier for a session
    async fn exchange_code(&self, auth_code: &str, code_verifier: &str) -> GateResult<Session>;

    /// Revoke the session behind an access token
    async fn sign_out(&self, access_token: &str) -> GateResult<()>;
}

/// Profile existence lookup
#[trait_variant::make(ProfileDirectory: Send)]
pub trait LocalProfileDirectory {
    async fn exists(&self, user_id: &UserId) -> GateResult<bool>;
}
