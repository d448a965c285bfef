//! Production Use Cases
//!
//! Every operation is scoped to the calling producer; a production owned by
//! someone else behaves exactly like a missing one.

use std::sync::Arc;

use kernel::id::{ProductionId, UserId};

use crate::application::config::FarmConfig;
use crate::domain::entities::{Production, ProductionDetails};
use crate::domain::repository::{ProductionRepository, ProfileRepository};
use crate::domain::value_objects::Coordinates;
use crate::error::{FarmError, FarmResult};

/// Production form fields
#[derive(Debug, Clone)]
pub struct ProductionInput {
    pub farm_name: String,
    pub farm_area: f64,
    pub farm_location: String,
    pub plantation_age: i32,
    /// `"lat,lng"`
    pub coordinates: String,
}

impl ProductionInput {
    fn validate(&self, config: &FarmConfig) -> FarmResult<ProductionDetails> {
        Ok(ProductionDetails {
            farm_name: config.text("Farm name", &self.farm_name)?,
            farm_area: config.farm_area(self.farm_area)?,
            farm_location: config.text("Farm location", &self.farm_location)?,
            plantation_age: config.plantation_age(self.plantation_age)?,
            coordinates: self.coordinates.parse::<Coordinates>()?,
        })
    }
}

pub struct ListProductionsUseCase<R>
where
    R: ProductionRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ListProductionsUseCase<R>
where
    R: ProductionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: &UserId) -> FarmResult<Vec<Production>> {
        self.repo.list_productions(owner).await
    }
}

pub struct CreateProductionUseCase<R>
where
    R: ProductionRepository + ProfileRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<FarmConfig>,
}

impl<R> CreateProductionUseCase<R>
where
    R: ProductionRepository + ProfileRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<FarmConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, owner: UserId, input: ProductionInput) -> FarmResult<Production> {
        let details = input.validate(&self.config)?;

        if !self.repo.profile_exists(&owner).await? {
            return Err(FarmError::ProfileRequired);
        }

        let production = Production::new(owner, details);
        self.repo.create_production(&production).await?;

        tracing::info!(
            user_id = %owner,
            production_id = %production.id,
            "Production registered"
        );

        Ok(production)
    }
}

pub struct UpdateProductionUseCase<R>
where
    R: ProductionRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<FarmConfig>,
}

impl<R> UpdateProductionUseCase<R>
where
    R: ProductionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<FarmConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        production_id: ProductionId,
        input: ProductionInput,
    ) -> FarmResult<Production> {
        let details = input.validate(&self.config)?;

        let mut production = self
            .repo
            .find_production(&production_id, &owner)
            .await?
            .ok_or(FarmError::ProductionNotFound)?;
        production.details = details;

        if !self.repo.update_production(&production).await? {
            return Err(FarmError::ProductionNotFound);
        }

        Ok(production)
    }
}

pub struct DeleteProductionUseCase<R>
where
    R: ProductionRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> DeleteProductionUseCase<R>
where
    R: ProductionRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: &UserId, production_id: &ProductionId) -> FarmResult<()> {
        if !self.repo.delete_production(production_id, owner).await? {
            return Err(FarmError::ProductionNotFound);
        }

        tracing::info!(user_id = %owner, production_id = %production_id, "Production deleted");
        Ok(())
    }
}
