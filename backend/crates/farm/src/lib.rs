//! Farm Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, dashboard aggregation, repository traits
//! - `application/` - Use cases and input limits
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Producer profile: completion (ends on-boarding), read, edit
//! - Reference catalogs: municipalities and coffee varieties
//! - Productions (farms) with GPS coordinates
//! - Coffee lots tracked from sowing to drying
//! - Dashboard summary
//!
//! ## Ownership
//! Every production and lot is reachable only by the producer who owns it;
//! anything else answers 404.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::FarmConfig;
pub use error::{FarmError, FarmResult};
pub use infra::PgFarmRepository;
pub use presentation::router::farm_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::services::DashboardSummary;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

#[cfg(test)]
mod tests;
