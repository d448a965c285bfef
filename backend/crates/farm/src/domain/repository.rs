//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Method names are unique across the traits so one store can implement
//! all of them without ambiguous calls.

use kernel::id::{CoffeeLotId, CoffeeVarietyId, ProductionId, UserId};

use crate::domain::entities::{City, CoffeeLot, CoffeeVariety, Production, Profile, ProfileRecord};
use crate::error::FarmResult;

/// Producer profiles
#[trait_variant::make(ProfileRepository: Send)]
pub trait LocalProfileRepository {
    async fn find_profile(&self, user_id: &UserId) -> FarmResult<Option<Profile>>;

    async fn profile_exists(&self, user_id: &UserId) -> FarmResult<bool>;

    /// Insert or replace the whole profile
    async fn upsert_profile(&self, profile: &ProfileRecord) -> FarmResult<()>;

    /// Returns false when no profile exists for the user
    async fn update_profile(&self, profile: &ProfileRecord) -> FarmResult<bool>;
}

/// Read-only reference data
#[trait_variant::make(CatalogRepository: Send)]
pub trait LocalCatalogRepository {
    async fn list_cities(&self) -> FarmResult<Vec<City>>;

    async fn find_city(&self, name: &str, state: &str) -> FarmResult<Option<City>>;

    async fn list_varieties(&self) -> FarmResult<Vec<CoffeeVariety>>;

    async fn variety_exists(&self, variety_id: &CoffeeVarietyId) -> FarmResult<bool>;
}

/// Productions, always scoped to their owner
#[trait_variant::make(ProductionRepository: Send)]
pub trait LocalProductionRepository {
    async fn list_productions(&self, owner: &UserId) -> FarmResult<Vec<Production>>;

    async fn find_production(
        &self,
        production_id: &ProductionId,
        owner: &UserId,
    ) -> FarmResult<Option<Production>>;

    async fn create_production(&self, production: &Production) -> FarmResult<()>;

    /// Returns false when the production does not exist for this owner
    async fn update_production(&self, production: &Production) -> FarmResult<bool>;

    /// Lots go with it. Returns false when nothing was deleted.
    async fn delete_production(&self, production_id: &ProductionId, owner: &UserId)
    -> FarmResult<bool>;
}

/// Coffee lots
#[trait_variant::make(LotRepository: Send)]
pub trait LocalLotRepository {
    /// Newest first
    async fn list_lots(&self, production_id: &ProductionId) -> FarmResult<Vec<CoffeeLot>>;

    /// Every lot of every production the owner has
    async fn list_owner_lots(&self, owner: &UserId) -> FarmResult<Vec<CoffeeLot>>;

    /// Lot, only if its production belongs to the owner
    async fn find_lot(&self, lot_id: &CoffeeLotId, owner: &UserId) -> FarmResult<Option<CoffeeLot>>;

    async fn create_lot(&self, lot: &CoffeeLot) -> FarmResult<()>;

    async fn update_lot_stage(&self, lot: &CoffeeLot) -> FarmResult<()>;
}

/// Everything the farm handlers need from one store
pub trait FarmRepository:
    ProfileRepository + CatalogRepository + ProductionRepository + LotRepository
{
}

impl<T> FarmRepository for T where
    T: ProfileRepository + CatalogRepository + ProductionRepository + LotRepository
{
}
