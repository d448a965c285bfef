//! Sign In Use Case
//!
//! Password sign-in against the auth service.

use std::sync::Arc;

use platform::cookie::PendingCookies;

use crate::application::config::GateConfig;
use crate::application::session_cookies::store_session;
use crate::domain::entity::auth_user::AuthUser;
use crate::domain::repository::IdentityService;
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::{GateError, GateResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub user: AuthUser,
    pub cookies: PendingCookies,
}

pub struct SignInUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    identity: Arc<I>,
    config: Arc<GateConfig>,
}

impl<I> SignInUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    pub fn new(identity: Arc<I>, config: Arc<GateConfig>) -> Self {
        Self { identity, config }
    }

    pub async fn execute(&self, input: SignInInput) -> GateResult<SignInOutput> {
        let email = Email::new(input.email)?;
        // a password outside the sign-up policy cannot belong to any account
        let password = Password::new(input.password).map_err(|_| GateError::InvalidCredentials)?;

        let session = self
            .identity
            .sign_in_with_password(&email, &password)
            .await?;

        let mut cookies = self.config.pending_cookies();
        store_session(&self.config, &session, &mut cookies);

        tracing::info!(user_id = %session.user.id, "User signed in");

        Ok(SignInOutput {
            user: session.user,
            cookies,
        })
    }
}
