//! Auth Callback Use Case
//!
//! Landing point of the email confirmation link. Redeems the PKCE auth code
//! for a session and sends the user to the next funnel step.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::{PendingCookies, extract_cookie};

use crate::application::config::GateConfig;
use crate::application::session_cookies::store_session;
use crate::domain::repository::{IdentityService, ProfileDirectory};

pub struct CallbackOutput {
    /// Page path to redirect to
    pub redirect_to: String,
    pub cookies: PendingCookies,
}

pub struct AuthCallbackUseCase<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    identity: Arc<I>,
    profiles: Arc<P>,
    config: Arc<GateConfig>,
}

impl<I, P> AuthCallbackUseCase<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    pub fn new(identity: Arc<I>, profiles: Arc<P>, config: Arc<GateConfig>) -> Self {
        Self {
            identity,
            profiles,
            config,
        }
    }

    pub async fn execute(&self, auth_code: Option<&str>, headers: &HeaderMap) -> CallbackOutput {
        let mut cookies = self.config.pending_cookies();
        let routes = &self.config.routes;

        let auth_code = auth_code.filter(|code| !code.is_empty());
        let verifier = extract_cookie(headers, &self.config.verifier_cookie_name);
        let (Some(auth_code), Some(verifier)) = (auth_code, verifier) else {
            tracing::warn!("Auth callback without code or verifier");
            return CallbackOutput {
                redirect_to: self.config.login_error_path(),
                cookies,
            };
        };

        // single use either way
        cookies.remove(&self.config.verifier_cookie_name);

        let session = match self.identity.exchange_code(auth_code, &verifier).await {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "Auth code exchange failed");
                return CallbackOutput {
                    redirect_to: self.config.login_error_path(),
                    cookies,
                };
            }
        };
        store_session(&self.config, &session, &mut cookies);

        let redirect_to = match self.profiles.exists(&session.user.id).await {
            Ok(true) => routes.dashboard.clone(),
            Ok(false) => routes.complete_profile.clone(),
            Err(e) => {
                // the gate re-checks on the next navigation
                tracing::warn!(error = %e, user_id = %session.user.id, "Profile lookup failed after callback");
                routes.dashboard.clone()
            }
        };

        tracing::info!(user_id = %session.user.id, redirect_to = %redirect_to, "Auth callback completed");

        CallbackOutput {
            redirect_to,
            cookies,
        }
    }
}
