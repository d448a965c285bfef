//! Domain Value Objects
//!
//! Immutable value types for the farm domain. Stage, status and the two
//! profile enumerations travel as the same codes the reference tables and
//! the frontend use.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// GPS position of a farm, stored as `"lat,lng"`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> AppResult<Self> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(AppError::bad_request("Latitude must be between -90 and 90"));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(AppError::bad_request("Longitude must be between -180 and 180"));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl FromStr for Coordinates {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        let invalid = || {
            AppError::bad_request("Coordinates must look like \"lat,lng\"")
                .with_action("Example: 4.8133,-75.6961")
        };

        let (lat, lng) = s.split_once(',').ok_or_else(invalid)?;
        let lat = lat.trim().parse::<f64>().map_err(|_| invalid())?;
        let lng = lng.trim().parse::<f64>().map_err(|_| invalid())?;
        Self::new(lat, lng)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// Growth stage of a coffee lot, in crop order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LotStage {
    #[serde(rename = "Sembrado")]
    Sown,
    #[serde(rename = "Germinación")]
    Germination,
    #[serde(rename = "Crecimiento")]
    Growth,
    #[serde(rename = "Floración")]
    Flowering,
    #[serde(rename = "Cosecha")]
    Harvest,
    #[serde(rename = "Beneficio")]
    WetMill,
    #[serde(rename = "Secado")]
    Drying,
}

impl LotStage {
    pub const ALL: [LotStage; 7] = [
        LotStage::Sown,
        LotStage::Germination,
        LotStage::Growth,
        LotStage::Flowering,
        LotStage::Harvest,
        LotStage::WetMill,
        LotStage::Drying,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LotStage::Sown => "Sembrado",
            LotStage::Germination => "Germinación",
            LotStage::Growth => "Crecimiento",
            LotStage::Flowering => "Floración",
            LotStage::Harvest => "Cosecha",
            LotStage::WetMill => "Beneficio",
            LotStage::Drying => "Secado",
        }
    }
}

impl FromStr for LotStage {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|stage| stage.code() == s)
            .ok_or_else(|| AppError::bad_request(format!("Unknown lot stage: {}", s)))
    }
}

/// Field status a producer assigns to a lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LotStatus {
    #[default]
    #[serde(rename = "Plantado")]
    Planted,
    #[serde(rename = "En crecimiento")]
    Growing,
    #[serde(rename = "Floración")]
    Flowering,
    #[serde(rename = "Cosecha")]
    Harvest,
    #[serde(rename = "Procesamiento")]
    Processing,
}

impl LotStatus {
    pub const ALL: [LotStatus; 5] = [
        LotStatus::Planted,
        LotStatus::Growing,
        LotStatus::Flowering,
        LotStatus::Harvest,
        LotStatus::Processing,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            LotStatus::Planted => "Plantado",
            LotStatus::Growing => "En crecimiento",
            LotStatus::Flowering => "Floración",
            LotStatus::Harvest => "Cosecha",
            LotStatus::Processing => "Procesamiento",
        }
    }
}

impl FromStr for LotStatus {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| AppError::bad_request(format!("Unknown lot status: {}", s)))
    }
}

/// Identity document type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdType {
    /// Cédula de ciudadanía
    Cc,
    /// Cédula de extranjería
    Ce,
    Pasaporte,
}

impl IdType {
    pub fn code(&self) -> &'static str {
        match self {
            IdType::Cc => "cc",
            IdType::Ce => "ce",
            IdType::Pasaporte => "pasaporte",
        }
    }
}

impl FromStr for IdType {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "cc" => Ok(IdType::Cc),
            "ce" => Ok(IdType::Ce),
            "pasaporte" => Ok(IdType::Pasaporte),
            _ => Err(AppError::bad_request(format!("Unknown id type: {}", s))),
        }
    }
}

/// Highest completed schooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Primaria,
    Secundaria,
    Tecnico,
    Tecnologico,
    Universitario,
    Postgrado,
}

impl EducationLevel {
    pub fn code(&self) -> &'static str {
        match self {
            EducationLevel::Primaria => "primaria",
            EducationLevel::Secundaria => "secundaria",
            EducationLevel::Tecnico => "tecnico",
            EducationLevel::Tecnologico => "tecnologico",
            EducationLevel::Universitario => "universitario",
            EducationLevel::Postgrado => "postgrado",
        }
    }
}

impl FromStr for EducationLevel {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "primaria" => Ok(EducationLevel::Primaria),
            "secundaria" => Ok(EducationLevel::Secundaria),
            "tecnico" => Ok(EducationLevel::Tecnico),
            "tecnologico" => Ok(EducationLevel::Tecnologico),
            "universitario" => Ok(EducationLevel::Universitario),
            "postgrado" => Ok(EducationLevel::Postgrado),
            _ => Err(AppError::bad_request(format!("Unknown education level: {}", s))),
        }
    }
}
