//! Evaluate Gate Use Case
//!
//! Gathers the facts the decision table needs for one navigation and
//! applies it. Never fails: service errors degrade to letting the
//! navigation through.

use std::sync::Arc;

use axum::http::HeaderMap;
use kernel::id::UserId;
use platform::cookie::PendingCookies;

use crate::application::config::GateConfig;
use crate::application::resolve_session::{ResolveSessionUseCase, SessionResolution};
use crate::domain::decision::{GateDecision, ProfileFact, SessionFact, decide};
use crate::domain::entity::auth_user::AuthUser;
use crate::domain::repository::{IdentityService, ProfileDirectory};
use crate::domain::value_object::nav_path::NavPath;

#[derive(Debug, Clone)]
pub struct GateOutcome {
    pub decision: GateDecision,
    /// Applied to the response whatever the decision
    pub cookies: PendingCookies,
    pub user: Option<AuthUser>,
}

impl GateOutcome {
    fn pass_through(cookies: PendingCookies) -> Self {
        Self {
            decision: GateDecision::PassThrough,
            cookies,
            user: None,
        }
    }
}

pub struct EvaluateGateUseCase<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    identity: Arc<I>,
    profiles: Arc<P>,
    config: Arc<GateConfig>,
}

impl<I, P> EvaluateGateUseCase<I, P>
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

    pub async fn execute(&self, path: &NavPath, headers: &HeaderMap) -> GateOutcome {
        if self.config.routes.is_bypassed(path) {
            return GateOutcome::pass_through(self.config.pending_cookies());
        }

        let resolver = ResolveSessionUseCase::new(self.identity.clone(), self.config.clone());
        let SessionResolution { user, cookies } = match resolver.execute(headers).await {
            Ok(resolution) => resolution,
            Err(e) => {
                tracing::warn!(error = %e, path = %path, "Session resolution failed, passing through");
                return GateOutcome::pass_through(self.config.pending_cookies());
            }
        };

        let fact = match &user {
            None => SessionFact::Absent,
            Some(user) if !user.is_email_confirmed() => SessionFact::Unconfirmed,
            Some(user) => SessionFact::Confirmed(self.profile_fact(path, &user.id).await),
        };

        GateOutcome {
            decision: decide(path, fact, &self.config.routes),
            cookies,
            user,
        }
    }

    async fn profile_fact(&self, path: &NavPath, user_id: &UserId) -> ProfileFact {
        if !self.config.routes.needs_profile(path) {
            return ProfileFact::Unknown;
        }

        match self.profiles.exists(user_id).await {
            Ok(true) => ProfileFact::Exists,
            Ok(false) => ProfileFact::Missing,
            Err(e) => {
                tracing::warn!(error = %e, user_id = %user_id, "Profile lookup failed, not redirecting");
                ProfileFact::Unknown
            }
        }
    }
}
