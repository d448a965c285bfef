//! Sign Out Use Case

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::{PendingCookies, extract_cookie};

use crate::application::config::GateConfig;
use crate::application::session_cookies::clear_session;
use crate::domain::repository::IdentityService;

pub struct SignOutUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    identity: Arc<I>,
    config: Arc<GateConfig>,
}

impl<I> SignOutUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    pub fn new(identity: Arc<I>, config: Arc<GateConfig>) -> Self {
        Self { identity, config }
    }

    /// Revoke the session at the auth service and clear the cookies.
    ///
    /// Revocation is best effort; the cookies are cleared regardless.
    pub async fn execute(&self, headers: &HeaderMap) -> PendingCookies {
        if let Some(access_token) = extract_cookie(headers, &self.config.access_cookie_name) {
            match self.identity.sign_out(&access_token).await {
                Ok(()) => tracing::info!("User signed out"),
                Err(e) => tracing::warn!(error = %e, "Auth service sign-out failed, clearing cookies anyway"),
            }
        }

        let mut cookies = self.config.pending_cookies();
        clear_session(&self.config, &mut cookies);
        cookies
    }
}
