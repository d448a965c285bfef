//! HTTP Handlers
//!
//! Every handler runs behind the require-user middleware, which puts the
//! caller's [`CurrentUser`] in the request extensions.

use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use kernel::id::{CoffeeLotId, ProductionId};
use kernel::identity::CurrentUser;
use std::sync::Arc;

use crate::application::config::FarmConfig;
use crate::application::{
    ChangeLotStageUseCase, CompleteProfileUseCase, CreateLotUseCase, CreateProductionUseCase,
    DashboardSummaryUseCase, DeleteProductionUseCase, GetProfileUseCase, ListCitiesUseCase,
    ListLotsUseCase, ListProductionsUseCase, ListVarietiesUseCase, UpdateProductionUseCase,
    UpdateProfileUseCase,
};
use crate::domain::repository::FarmRepository;
use crate::error::FarmResult;
use crate::presentation::dto::{
    CityResponse, DashboardSummaryResponse, LotRequest, LotResponse, ProductionRequest,
    ProductionResponse, ProfileRequest, ProfileResponse, StageRequest, VarietyResponse,
};

/// Shared state for farm handlers
pub struct FarmAppState<R>
where
    R: FarmRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<FarmConfig>,
}

impl<R> FarmAppState<R>
where
    R: FarmRepository + Send + Sync + 'static,
{
    pub fn new(repo: R, config: FarmConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

// Manual impl: only the Arcs are cloned
impl<R> Clone for FarmAppState<R>
where
    R: FarmRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/profile
pub async fn get_profile<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
) -> FarmResult<Json<ProfileResponse>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let profile = GetProfileUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    Ok(Json(profile.into()))
}

/// POST /api/profile
pub async fn complete_profile<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ProfileRequest>,
) -> FarmResult<Json<ProfileResponse>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let profile = CompleteProfileUseCase::new(state.repo.clone(), state.config.clone())
        .execute(user.user_id, req.into())
        .await?;

    Ok(Json(profile.into()))
}

/// PUT /api/profile
pub async fn update_profile<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ProfileRequest>,
) -> FarmResult<Json<ProfileResponse>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let profile = UpdateProfileUseCase::new(state.repo.clone(), state.config.clone())
        .execute(user.user_id, req.into())
        .await?;

    Ok(Json(profile.into()))
}

// ============================================================================
// Catalog
// ============================================================================

/// GET /api/catalog/cities
pub async fn list_cities<R>(
    State(state): State<FarmAppState<R>>,
) -> FarmResult<Json<Vec<CityResponse>>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let cities = ListCitiesUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(cities.into_iter().map(Into::into).collect()))
}

/// GET /api/catalog/varieties
pub async fn list_varieties<R>(
    State(state): State<FarmAppState<R>>,
) -> FarmResult<Json<Vec<VarietyResponse>>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let varieties = ListVarietiesUseCase::new(state.repo.clone()).execute().await?;
    Ok(Json(varieties.into_iter().map(Into::into).collect()))
}

// ============================================================================
// Productions
// ============================================================================

/// GET /api/productions
pub async fn list_productions<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
) -> FarmResult<Json<Vec<ProductionResponse>>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let productions = ListProductionsUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    Ok(Json(productions.into_iter().map(Into::into).collect()))
}

/// POST /api/productions
pub async fn create_production<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<ProductionRequest>,
) -> FarmResult<Response>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let production = CreateProductionUseCase::new(state.repo.clone(), state.config.clone())
        .execute(user.user_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(ProductionResponse::from(production))).into_response())
}

/// PUT /api/productions/{id}
pub async fn update_production<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(production_id): Path<ProductionId>,
    Json(req): Json<ProductionRequest>,
) -> FarmResult<Json<ProductionResponse>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let production = UpdateProductionUseCase::new(state.repo.clone(), state.config.clone())
        .execute(user.user_id, production_id, req.into())
        .await?;

    Ok(Json(production.into()))
}

/// DELETE /api/productions/{id}
pub async fn delete_production<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(production_id): Path<ProductionId>,
) -> FarmResult<StatusCode>
where
    R: FarmRepository + Send + Sync + 'static,
{
    DeleteProductionUseCase::new(state.repo.clone())
        .execute(&user.user_id, &production_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Lots
// ============================================================================

/// GET /api/productions/{id}/lots
pub async fn list_lots<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(production_id): Path<ProductionId>,
) -> FarmResult<Json<Vec<LotResponse>>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let lots = ListLotsUseCase::new(state.repo.clone())
        .execute(&user.user_id, &production_id)
        .await?;

    Ok(Json(lots.into_iter().map(Into::into).collect()))
}

/// POST /api/productions/{id}/lots
pub async fn create_lot<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(production_id): Path<ProductionId>,
    Json(req): Json<LotRequest>,
) -> FarmResult<Response>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let lot = CreateLotUseCase::new(state.repo.clone(), state.config.clone())
        .execute(user.user_id, production_id, req.into())
        .await?;

    Ok((StatusCode::CREATED, Json(LotResponse::from(lot))).into_response())
}

/// PATCH /api/lots/{id}/stage
pub async fn change_lot_stage<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
    Path(lot_id): Path<CoffeeLotId>,
    Json(req): Json<StageRequest>,
) -> FarmResult<Json<LotResponse>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let lot = ChangeLotStageUseCase::new(state.repo.clone())
        .execute(&user.user_id, &lot_id, req.stage)
        .await?;

    Ok(Json(lot.into()))
}

// ============================================================================
// Dashboard
// ============================================================================

/// GET /api/dashboard/summary
pub async fn dashboard_summary<R>(
    State(state): State<FarmAppState<R>>,
    Extension(user): Extension<CurrentUser>,
) -> FarmResult<Json<DashboardSummaryResponse>>
where
    R: FarmRepository + Send + Sync + 'static,
{
    let summary = DashboardSummaryUseCase::new(state.repo.clone())
        .execute(&user.user_id)
        .await?;

    Ok(Json(summary.into()))
}
