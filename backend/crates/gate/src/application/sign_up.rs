//! Sign Up Use Case
//!
//! Registers a new account with the auth service. The confirmation link
//! carries a PKCE auth code; the matching verifier waits in a cookie until
//! the callback redeems it.

use std::sync::Arc;

use platform::cookie::PendingCookies;
use platform::crypto::PkcePair;

use crate::application::config::GateConfig;
use crate::application::session_cookies::store_session;
use crate::domain::entity::{auth_user::AuthUser, session::SignUpOutcome};
use crate::domain::repository::IdentityService;
use crate::domain::value_object::{email::Email, password::Password};
use crate::error::GateResult;

pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

pub struct SignUpOutput {
    pub user: AuthUser,
    /// False when the auth service signed the user in right away
    pub confirmation_sent: bool,
    pub cookies: PendingCookies,
}

pub struct SignUpUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    identity: Arc<I>,
    config: Arc<GateConfig>,
}

impl<I> SignUpUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    pub fn new(identity: Arc<I>, config: Arc<GateConfig>) -> Self {
        Self { identity, config }
    }

    pub async fn execute(&self, input: SignUpInput) -> GateResult<SignUpOutput> {
        let email = Email::new(input.email)?;
        let password = Password::new(input.password)?;
        let pkce = PkcePair::generate();

        let outcome = self
            .identity
            .sign_up(
                &email,
                &password,
                &self.config.callback_url(),
                &pkce.challenge,
            )
            .await?;

        let mut cookies = self.config.pending_cookies();
        let confirmation_sent = match &outcome {
            SignUpOutcome::ConfirmationSent(_) => {
                cookies.set(
                    &self.config.verifier_cookie_name,
                    &pkce.verifier,
                    Some(self.config.verifier_cookie_ttl.as_secs() as i64),
                );
                true
            }
            SignUpOutcome::SignedIn(session) => {
                store_session(&self.config, session, &mut cookies);
                false
            }
        };

        let user = outcome.user().clone();
        tracing::info!(
            user_id = %user.id,
            email_domain = %email.domain(),
            confirmation_sent,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            confirmation_sent,
            cookies,
        })
    }
}
