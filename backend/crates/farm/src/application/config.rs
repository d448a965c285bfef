//! Application Configuration
//!
//! Input limits for the farm use cases.

use kernel::error::app_error::{AppError, AppResult};

/// Farm application configuration
#[derive(Debug, Clone)]
pub struct FarmConfig {
    /// Longest accepted free-text field (names, locations, document numbers)
    pub max_text_len: usize,
    /// Hectares
    pub max_farm_area: f64,
    /// Years
    pub max_plantation_age: i32,
    pub max_plant_count: i32,
}

impl Default for FarmConfig {
    fn default() -> Self {
        Self {
            max_text_len: 120,
            max_farm_area: 10_000.0,
            max_plantation_age: 150,
            max_plant_count: 10_000_000,
        }
    }
}

impl FarmConfig {
    /// Trimmed, non-empty text within the length limit
    pub fn text(&self, field: &'static str, value: &str) -> AppResult<String> {
        let value = value.trim();
        if value.is_empty() {
            return Err(AppError::bad_request(format!("{} is required", field)));
        }
        if value.chars().count() > self.max_text_len {
            return Err(AppError::bad_request(format!(
                "{} must be at most {} characters",
                field, self.max_text_len
            )));
        }
        Ok(value.to_string())
    }

    pub fn farm_area(&self, value: f64) -> AppResult<f64> {
        if !value.is_finite() || value <= 0.0 || value > self.max_farm_area {
            return Err(AppError::bad_request(format!(
                "Farm area must be greater than 0 and at most {} hectares",
                self.max_farm_area
            )));
        }
        Ok(value)
    }

    pub fn plantation_age(&self, value: i32) -> AppResult<i32> {
        if !(0..=self.max_plantation_age).contains(&value) {
            return Err(AppError::bad_request(format!(
                "Plantation age must be between 0 and {} years",
                self.max_plantation_age
            )));
        }
        Ok(value)
    }

    pub fn plant_count(&self, value: i32) -> AppResult<i32> {
        if !(0..=self.max_plant_count).contains(&value) {
            return Err(AppError::bad_request(format!(
                "Plant count must be between 0 and {}",
                self.max_plant_count
            )));
        }
        Ok(value)
    }
}
