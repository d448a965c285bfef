//! Gate Middleware
//!
//! `session_gate` guards page navigations with redirects; `require_user`
//! guards JSON routes with a 401. Both hand the resolved user to downstream
//! handlers as a `kernel::identity::CurrentUser` extension and write any refreshed cookies
//! onto the single outgoing response.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};

use crate::application::{EvaluateGateUseCase, ResolveSessionUseCase};
use crate::domain::decision::GateDecision;
use crate::domain::repository::{IdentityService, ProfileDirectory};
use crate::domain::value_object::nav_path::NavPath;
use crate::presentation::handlers::GateAppState;

/// Middleware state
pub type GateMiddlewareState<I, P> = GateAppState<I, P>;

/// Redirect page navigations according to the gate rules
pub async fn session_gate<I, P>(
    state: GateMiddlewareState<I, P>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let path = NavPath::new(req.uri().path());

    let use_case = EvaluateGateUseCase::new(
        state.identity.clone(),
        state.profiles.clone(),
        state.config.clone(),
    );
    let outcome = use_case.execute(&path, req.headers()).await;

    let mut response = match outcome.decision {
        GateDecision::Redirect(destination) => {
            tracing::debug!(path = %path, destination = %destination, "Gate redirect");
            Redirect::temporary(state.config.routes.path(destination)).into_response()
        }
        GateDecision::PassThrough => {
            outcome.cookies.apply_to_request(req.headers_mut());
            if let Some(user) = &outcome.user {
                req.extensions_mut().insert(user.to_current_user());
            }
            next.run(req).await
        }
    };

    outcome.cookies.apply_to_response(response.headers_mut());
    response
}

/// Answer 401 unless the request carries a usable session
pub async fn require_user<I, P>(
    state: GateMiddlewareState<I, P>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, Response>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let use_case = ResolveSessionUseCase::new(state.identity.clone(), state.config.clone());

    let resolution = match use_case.execute(req.headers()).await {
        Ok(resolution) => resolution,
        Err(e) => return Err(e.into_response()),
    };

    let Some(user) = resolution.user else {
        let mut response = (StatusCode::UNAUTHORIZED, [("X-Auth-Required", "true")]).into_response();
        resolution.cookies.apply_to_response(response.headers_mut());
        return Err(response);
    };

    resolution.cookies.apply_to_request(req.headers_mut());
    req.extensions_mut().insert(user.to_current_user());

    let mut response = next.run(req).await;
    resolution.cookies.apply_to_response(response.headers_mut());
    Ok(response)
}

/// Wrap page routes with [`session_gate`]
pub fn with_session_gate<I, P>(router: Router, state: GateMiddlewareState<I, P>) -> Router
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        let state = state.clone();
        async move { session_gate(state, req, next).await }
    }))
}

/// Wrap JSON routes with [`require_user`]
pub fn with_required_user<I, P>(router: Router, state: GateMiddlewareState<I, P>) -> Router
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(move |req: Request<Body>, next: Next| {
        let state = state.clone();
        async move { require_user(state, req, next).await }
    }))
}
