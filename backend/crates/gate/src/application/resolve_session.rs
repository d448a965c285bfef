//! Resolve Session Use Case
//!
//! Turns the token cookies of a request into the user behind them, asking
//! the auth service and refreshing the pair when the access token is stale.
//! Cookie changes are collected, never written directly.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::{PendingCookies, extract_cookie};

use crate::application::config::GateConfig;
use crate::application::session_cookies::{clear_session, store_session};
use crate::domain::entity::auth_user::AuthUser;
use crate::domain::repository::IdentityService;
use crate::error::GateResult;

#[derive(Debug, Clone)]
pub struct SessionResolution {
    /// User behind a session the auth service accepted
    pub user: Option<AuthUser>,
    /// Cookie changes to apply to the outgoing response
    pub cookies: PendingCookies,
}

pub struct ResolveSessionUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    identity: Arc<I>,
    config: Arc<GateConfig>,
}

impl<I> ResolveSessionUseCase<I>
where
    I: IdentityService + Send + Sync + 'static,
{
    pub fn new(identity: Arc<I>, config: Arc<GateConfig>) -> Self {
        Self { identity, config }
    }

    /// Resolve the session carried by the request cookies.
    ///
    /// Rejected tokens yield `user: None`; only transport failures and
    /// unexpected answers from the auth service are errors.
    pub async fn execute(&self, headers: &HeaderMap) -> GateResult<SessionResolution> {
        let mut cookies = self.config.pending_cookies();
        let access_token = extract_cookie(headers, &self.config.access_cookie_name);
        let refresh_token = extract_cookie(headers, &self.config.refresh_cookie_name);

        if let Some(access_token) = &access_token {
            if let Some(user) = self.identity.get_user(access_token).await? {
                return Ok(SessionResolution {
                    user: Some(user),
                    cookies,
                });
            }
            tracing::debug!("Access token rejected by auth service");
        }

        if let Some(refresh_token) = &refresh_token {
            return match self.identity.refresh_session(refresh_token).await? {
                Some(session) => {
                    store_session(&self.config, &session, &mut cookies);
                    tracing::debug!(user_id = %session.user.id, "Session refreshed");
                    Ok(SessionResolution {
                        user: Some(session.user),
                        cookies,
                    })
                }
                None => {
                    tracing::debug!("Refresh token rejected, clearing session cookies");
                    clear_session(&self.config, &mut cookies);
                    Ok(SessionResolution {
                        user: None,
                        cookies,
                    })
                }
            };
        }

        if access_token.is_some() {
            cookies.remove(&self.config.access_cookie_name);
        }

        Ok(SessionResolution {
            user: None,
            cookies,
        })
    }
}
