//! Farm Router

use axum::{
    Router,
    routing::{get, patch, put},
};

use crate::application::config::FarmConfig;
use crate::domain::repository::FarmRepository;
use crate::infra::PgFarmRepository;
use crate::presentation::handlers::{self, FarmAppState};

/// Create the farm API router with PostgreSQL
///
/// Expects a [`kernel::identity::CurrentUser`] extension on every request, so
/// mount it behind the require-user middleware.
pub fn farm_router(repo: PgFarmRepository, config: FarmConfig) -> Router {
    farm_router_generic(FarmAppState::new(repo, config))
}

/// Create the farm API router for any repository implementation
pub fn farm_router_generic<R>(state: FarmAppState<R>) -> Router
where
    R: FarmRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/profile",
            get(handlers::get_profile::<R>)
                .post(handlers::complete_profile::<R>)
                .put(handlers::update_profile::<R>),
        )
        .route("/catalog/cities", get(handlers::list_cities::<R>))
        .route("/catalog/varieties", get(handlers::list_varieties::<R>))
        .route(
            "/productions",
            get(handlers::list_productions::<R>).post(handlers::create_production::<R>),
        )
        .route(
            "/productions/{id}",
            put(handlers::update_production::<R>).delete(handlers::delete_production::<R>),
        )
        .route(
            "/productions/{id}/lots",
            get(handlers::list_lots::<R>).post(handlers::create_lot::<R>),
        )
        .route("/lots/{id}/stage", patch(handlers::change_lot_stage::<R>))
        .route("/dashboard/summary", get(handlers::dashboard_summary::<R>))
        .with_state(state)
}
