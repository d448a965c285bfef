//! Application Layer
//!
//! Use cases and application services.

pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod lots;
pub mod productions;
pub mod profile;

// Re-exports
pub use catalog::{ListCitiesUseCase, ListVarietiesUseCase};
pub use config::FarmConfig;
pub use dashboard::DashboardSummaryUseCase;
pub use lots::{ChangeLotStageUseCase, CreateLotUseCase, ListLotsUseCase, LotInput};
pub use productions::{
    CreateProductionUseCase, DeleteProductionUseCase, ListProductionsUseCase, ProductionInput,
    UpdateProductionUseCase,
};
pub use profile::{
    CompleteProfileUseCase, GetProfileUseCase, ProfileInput, UpdateProfileUseCase,
};
