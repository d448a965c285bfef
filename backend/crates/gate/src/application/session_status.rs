//! Session Status Use Case
//!
//! Answers "who am I" for the frontend: the verification page shows the
//! address the link was sent to, the shell decides which menu to render.

use std::sync::Arc;

use axum::http::HeaderMap;
use platform::cookie::PendingCookies;

use crate::application::config::GateConfig;
use crate::application::resolve_session::ResolveSessionUseCase;
use crate::domain::entity::auth_user::AuthUser;
use crate::domain::repository::{IdentityService, ProfileDirectory};
use crate::error::GateResult;

pub struct SessionStatusOutput {
    pub user: Option<AuthUser>,
    /// Only known for confirmed users whose lookup succeeded
    pub profile_complete: Option<bool>,
    pub cookies: PendingCookies,
}

pub struct SessionStatusUseCase<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    identity: Arc<I>,
    profiles: Arc<P>,
    config: Arc<GateConfig>,
}

impl<I, P> SessionStatusUseCase<I, P>
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

    pub async fn execute(&self, headers: &HeaderMap) -> GateResult<SessionStatusOutput> {
        let resolution = ResolveSessionUseCase::new(self.identity.clone(), self.config.clone())
            .execute(headers)
            .await?;

        let Some(user) = resolution.user else {
            return Ok(SessionStatusOutput {
                user: None,
                profile_complete: None,
                cookies: resolution.cookies,
            });
        };

        let profile_complete = if user.is_email_confirmed() {
            match self.profiles.exists(&user.id).await {
                Ok(exists) => Some(exists),
                Err(e) => {
                    tracing::warn!(error = %e, user_id = %user.id, "Profile lookup failed");
                    None
                }
            }
        } else {
            None
        };

        Ok(SessionStatusOutput {
            user: Some(user),
            profile_complete,
            cookies: resolution.cookies,
        })
    }
}
