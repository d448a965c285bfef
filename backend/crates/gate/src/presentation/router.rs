//! Gate Router

use axum::{
    Router,
    routing::{get, post},
};

use crate::application::config::GateConfig;
use crate::domain::repository::{IdentityService, ProfileDirectory};
use crate::infra::{HttpIdentityService, PgProfileDirectory};
use crate::presentation::handlers::{self, GateAppState};

/// Create the `/api/auth` router with the HTTP auth service and PostgreSQL
pub fn auth_router(
    identity: HttpIdentityService,
    profiles: PgProfileDirectory,
    config: GateConfig,
) -> Router {
    auth_router_generic(GateAppState::new(identity, profiles, config))
}

/// Create the `/api/auth` router for any service implementation
pub fn auth_router_generic<I, P>(state: GateAppState<I, P>) -> Router
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<I, P>))
        .route("/signin", post(handlers::sign_in::<I, P>))
        .route("/signout", post(handlers::sign_out::<I, P>))
        .route("/session", get(handlers::session_status::<I, P>))
        .with_state(state)
}

/// Page route that redeems the confirmation link
pub fn callback_router<I, P>(state: GateAppState<I, P>) -> Router
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let path = state.config.routes.callback.clone();
    Router::new()
        .route(&path, get(handlers::auth_callback::<I, P>))
        .with_state(state)
}
