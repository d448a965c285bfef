//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CoffeeLotId, CoffeeVarietyId, ProductionId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::{LotInput, ProductionInput, ProfileInput};
use crate::domain::entities::{City, CoffeeLot, CoffeeVariety, Production, Profile};
use crate::domain::services::DashboardSummary;
use crate::domain::value_objects::{EducationLevel, IdType, LotStage, LotStatus};

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub state: String,
    pub city: String,
    pub education_level: EducationLevel,
}

impl From<ProfileRequest> for ProfileInput {
    fn from(req: ProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            id_type: req.id_type,
            id_number: req.id_number,
            phone: req.phone,
            birth_date: req.birth_date,
            state: req.state,
            city: req.city,
            education_level: req.education_level,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub city: CityResponse,
    pub education_level: EducationLevel,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileResponse {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            first_name: profile.first_name,
            last_name: profile.last_name,
            id_type: profile.id_type,
            id_number: profile.id_number,
            phone: profile.phone,
            birth_date: profile.birth_date,
            city: profile.city.into(),
            education_level: profile.education_level,
            updated_at: profile.updated_at,
        }
    }
}

// ============================================================================
// Catalog
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CityResponse {
    pub id: i32,
    pub name: String,
    pub state: String,
}

impl From<City> for CityResponse {
    fn from(city: City) -> Self {
        Self {
            id: city.id,
            name: city.name,
            state: city.state,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VarietyResponse {
    pub id: CoffeeVarietyId,
    pub name: String,
}

impl From<CoffeeVariety> for VarietyResponse {
    fn from(variety: CoffeeVariety) -> Self {
        Self {
            id: variety.id,
            name: variety.name,
        }
    }
}

// ============================================================================
// Productions
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionRequest {
    pub farm_name: String,
    /// Hectares
    pub farm_area: f64,
    pub farm_location: String,
    pub plantation_age: i32,
    /// `"lat,lng"`
    pub coordinates: String,
}

impl From<ProductionRequest> for ProductionInput {
    fn from(req: ProductionRequest) -> Self {
        Self {
            farm_name: req.farm_name,
            farm_area: req.farm_area,
            farm_location: req.farm_location,
            plantation_age: req.plantation_age,
            coordinates: req.coordinates,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionResponse {
    pub id: ProductionId,
    pub farm_name: String,
    pub farm_area: f64,
    pub farm_location: String,
    pub plantation_age: i32,
    pub coordinates: String,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl From<Production> for ProductionResponse {
    fn from(production: Production) -> Self {
        let details = production.details;
        Self {
            id: production.id,
            farm_name: details.farm_name,
            farm_area: details.farm_area,
            farm_location: details.farm_location,
            plantation_age: details.plantation_age,
            coordinates: details.coordinates.to_string(),
            latitude: details.coordinates.lat(),
            longitude: details.coordinates.lng(),
            created_at: production.created_at,
        }
    }
}

// ============================================================================
// Lots
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotRequest {
    pub name: String,
    #[serde(default)]
    pub variety_id: Option<CoffeeVarietyId>,
    pub plant_count: i32,
    #[serde(default)]
    pub status: Option<LotStatus>,
}

impl From<LotRequest> for LotInput {
    fn from(req: LotRequest) -> Self {
        Self {
            name: req.name,
            variety_id: req.variety_id,
            plant_count: req.plant_count,
            status: req.status,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StageRequest {
    pub stage: LotStage,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LotResponse {
    pub id: CoffeeLotId,
    pub production_id: ProductionId,
    pub name: String,
    pub variety_id: Option<CoffeeVarietyId>,
    pub variety_name: Option<String>,
    pub plant_count: i32,
    pub stage: LotStage,
    pub stage_date: DateTime<Utc>,
    pub status: LotStatus,
    pub created_at: DateTime<Utc>,
}

impl From<CoffeeLot> for LotResponse {
    fn from(lot: CoffeeLot) -> Self {
        Self {
            id: lot.id,
            production_id: lot.production_id,
            name: lot.name,
            variety_id: lot.variety_id,
            variety_name: lot.variety_name,
            plant_count: lot.plant_count,
            stage: lot.stage,
            stage_date: lot.stage_date,
            status: lot.status,
            created_at: lot.created_at,
        }
    }
}

// ============================================================================
// Dashboard
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct StageCount {
    pub stage: LotStage,
    pub lots: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct VarietyPlants {
    pub variety: String,
    pub plants: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryResponse {
    pub production_count: usize,
    pub total_farm_area: f64,
    pub lot_count: usize,
    pub total_plants: i64,
    pub lots_per_stage: Vec<StageCount>,
    pub plants_per_variety: Vec<VarietyPlants>,
    pub average_plantation_age: Option<f64>,
}

impl From<DashboardSummary> for DashboardSummaryResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            production_count: summary.production_count,
            total_farm_area: summary.total_farm_area,
            lot_count: summary.lot_count,
            total_plants: summary.total_plants,
            lots_per_stage: summary
                .lots_per_stage
                .into_iter()
                .map(|(stage, lots)| StageCount { stage, lots })
                .collect(),
            plants_per_variety: summary
                .plants_per_variety
                .into_iter()
                .map(|(variety, plants)| VarietyPlants { variety, plants })
                .collect(),
            average_plantation_age: summary.average_plantation_age,
        }
    }
}
