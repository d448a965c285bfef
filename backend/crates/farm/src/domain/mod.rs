//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Profile, Production, CoffeeLot, catalogs)
//! - Domain value objects (Coordinates, LotStage, LotStatus, IdType, EducationLevel)
//! - Domain services (dashboard aggregation)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
