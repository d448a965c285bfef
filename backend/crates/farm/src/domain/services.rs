//! Domain Services
//!
//! Pure aggregation for the producer dashboard.

use std::collections::BTreeMap;

use crate::domain::entities::{CoffeeLot, Production};
use crate::domain::value_objects::LotStage;

/// Figures shown on the dashboard landing page
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub production_count: usize,
    /// Hectares across all productions
    pub total_farm_area: f64,
    pub lot_count: usize,
    pub total_plants: i64,
    /// Every stage in crop order, zero when no lot is in it
    pub lots_per_stage: Vec<(LotStage, usize)>,
    /// Sorted by variety name; lots without one count under [`UNKNOWN_VARIETY`]
    pub plants_per_variety: Vec<(String, i64)>,
    /// `None` without productions
    pub average_plantation_age: Option<f64>,
}

pub const UNKNOWN_VARIETY: &str = "Sin variedad";

/// Summarize a producer's productions and lots
pub fn summarize(productions: &[Production], lots: &[CoffeeLot]) -> DashboardSummary {
    let total_farm_area: f64 = productions.iter().map(|p| p.details.farm_area).sum();

    let average_plantation_age = if productions.is_empty() {
        None
    } else {
        let total: i64 = productions
            .iter()
            .map(|p| i64::from(p.details.plantation_age))
            .sum();
        Some(total as f64 / productions.len() as f64)
    };

    let lots_per_stage = LotStage::ALL
        .into_iter()
        .map(|stage| (stage, lots.iter().filter(|lot| lot.stage == stage).count()))
        .collect();

    let mut per_variety: BTreeMap<String, i64> = BTreeMap::new();
    for lot in lots {
        let name = lot.variety_name.as_deref().unwrap_or(UNKNOWN_VARIETY);
        *per_variety.entry(name.to_string()).or_default() += i64::from(lot.plant_count);
    }

    DashboardSummary {
        production_count: productions.len(),
        total_farm_area,
        lot_count: lots.len(),
        total_plants: lots.iter().map(|lot| i64::from(lot.plant_count)).sum(),
        lots_per_stage,
        plants_per_variety: per_variety.into_iter().collect(),
        average_plantation_age,
    }
}
