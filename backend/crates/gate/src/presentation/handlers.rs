//! HTTP Handlers

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::PendingCookies;
use std::sync::Arc;

use crate::application::config::GateConfig;
use crate::application::{
    AuthCallbackUseCase, SessionStatusUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{IdentityService, ProfileDirectory};
use crate::error::GateResult;
use crate::presentation::dto::{
    CallbackQuery, SessionStatusResponse, SignInRequest, SignInResponse, SignUpRequest,
    SignUpResponse,
};

/// Shared state for gate handlers and middleware
pub struct GateAppState<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    pub identity: Arc<I>,
    pub profiles: Arc<P>,
    pub config: Arc<GateConfig>,
}

impl<I, P> GateAppState<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    pub fn new(identity: I, profiles: P, config: GateConfig) -> Self {
        Self {
            identity: Arc::new(identity),
            profiles: Arc::new(profiles),
            config: Arc::new(config),
        }
    }
}

// Manual impl: only the Arcs are cloned
impl<I, P> Clone for GateAppState<I, P>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            identity: self.identity.clone(),
            profiles: self.profiles.clone(),
            config: self.config.clone(),
        }
    }
}

fn with_cookies(mut response: Response, cookies: &PendingCookies) -> Response {
    cookies.apply_to_response(response.headers_mut());
    response
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<I, P>(
    State(state): State<GateAppState<I, P>>,
    Json(req): Json<SignUpRequest>,
) -> GateResult<Response>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.identity.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let body = SignUpResponse {
        user_id: output.user.id.to_string(),
        confirmation_sent: output.confirmation_sent,
    };

    Ok(with_cookies(
        (StatusCode::CREATED, Json(body)).into_response(),
        &output.cookies,
    ))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<I, P>(
    State(state): State<GateAppState<I, P>>,
    Json(req): Json<SignInRequest>,
) -> GateResult<Response>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(state.identity.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let body = SignInResponse {
        user_id: output.user.id.to_string(),
        email_confirmed: output.user.is_email_confirmed(),
    };

    Ok(with_cookies(Json(body).into_response(), &output.cookies))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
pub async fn sign_out<I, P>(State(state): State<GateAppState<I, P>>, headers: HeaderMap) -> Response
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let use_case = SignOutUseCase::new(state.identity.clone(), state.config.clone());
    let cookies = use_case.execute(&headers).await;

    with_cookies(StatusCode::NO_CONTENT.into_response(), &cookies)
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/session
pub async fn session_status<I, P>(
    State(state): State<GateAppState<I, P>>,
    headers: HeaderMap,
) -> GateResult<Response>
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let use_case = SessionStatusUseCase::new(
        state.identity.clone(),
        state.profiles.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(&headers).await?;

    let body = match &output.user {
        Some(user) => SessionStatusResponse {
            authenticated: true,
            user_id: Some(user.id.to_string()),
            email: user.email.as_ref().map(|email| email.as_str().to_string()),
            email_confirmed: user.is_email_confirmed(),
            profile_complete: output.profile_complete,
        },
        None => SessionStatusResponse::default(),
    };

    Ok(with_cookies(Json(body).into_response(), &output.cookies))
}

// ============================================================================
// Auth Callback (page route)
// ============================================================================

/// GET /auth/callback?code=...
pub async fn auth_callback<I, P>(
    State(state): State<GateAppState<I, P>>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
) -> Response
where
    I: IdentityService + Send + Sync + 'static,
    P: ProfileDirectory + Send + Sync + 'static,
{
    let use_case = AuthCallbackUseCase::new(
        state.identity.clone(),
        state.profiles.clone(),
        state.config.clone(),
    );

    let output = use_case.execute(query.code.as_deref(), &headers).await;

    with_cookies(Redirect::to(&output.redirect_to).into_response(), &output.cookies)
}
