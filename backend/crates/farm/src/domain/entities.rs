//! Domain Entities
//!
//! Core business entities for the farm domain.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CoffeeLotId, CoffeeVarietyId, ProductionId, UserId};

use crate::domain::value_objects::{
    Coordinates, EducationLevel, IdType, LotStage, LotStatus,
};

/// Municipality from the reference catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: i32,
    pub name: String,
    /// Department the municipality belongs to
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoffeeVariety {
    pub id: CoffeeVarietyId,
    pub name: String,
}

/// Producer profile; its existence marks on-boarding as complete
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Same id as the auth user
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub city: City,
    pub education_level: EducationLevel,
    pub updated_at: DateTime<Utc>,
}

/// Profile fields as written, with the city already resolved
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    pub city_id: i32,
    pub education_level: EducationLevel,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields of a production
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionDetails {
    pub farm_name: String,
    /// Hectares
    pub farm_area: f64,
    pub farm_location: String,
    /// Years since planting
    pub plantation_age: i32,
    pub coordinates: Coordinates,
}

/// A farm registered by a producer
#[derive(Debug, Clone, PartialEq)]
pub struct Production {
    pub id: ProductionId,
    pub owner: UserId,
    pub details: ProductionDetails,
    pub created_at: DateTime<Utc>,
}

impl Production {
    pub fn new(owner: UserId, details: ProductionDetails) -> Self {
        Self {
            id: ProductionId::new(),
            owner,
            details,
            created_at: Utc::now(),
        }
    }
}

/// A block of plants tracked through the growth stages
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeLot {
    pub id: CoffeeLotId,
    pub production_id: ProductionId,
    pub name: String,
    pub variety_id: Option<CoffeeVarietyId>,
    /// Filled on reads
    pub variety_name: Option<String>,
    pub plant_count: i32,
    pub stage: LotStage,
    /// When the current stage was entered
    pub stage_date: DateTime<Utc>,
    pub status: LotStatus,
    pub created_at: DateTime<Utc>,
}

impl CoffeeLot {
    /// New lot, freshly sown
    pub fn plant(
        production_id: ProductionId,
        name: String,
        variety_id: Option<CoffeeVarietyId>,
        plant_count: i32,
        status: LotStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CoffeeLotId::new(),
            production_id,
            name,
            variety_id,
            variety_name: None,
            plant_count,
            stage: LotStage::Sown,
            stage_date: now,
            status,
            created_at: now,
        }
    }

    /// Move to a stage, restarting the stage clock
    pub fn enter_stage(&mut self, stage: LotStage) {
        self.stage = stage;
        self.stage_date = Utc::now();
    }
}
