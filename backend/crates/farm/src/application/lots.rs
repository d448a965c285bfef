//! Coffee Lot Use Cases

use std::sync::Arc;

use kernel::id::{CoffeeLotId, CoffeeVarietyId, ProductionId, UserId};

use crate::application::config::FarmConfig;
use crate::domain::entities::CoffeeLot;
use crate::domain::repository::{CatalogRepository, LotRepository, ProductionRepository};
use crate::domain::value_objects::{LotStage, LotStatus};
use crate::error::{FarmError, FarmResult};

#[derive(Debug, Clone)]
pub struct LotInput {
    pub name: String,
    pub variety_id: Option<CoffeeVarietyId>,
    pub plant_count: i32,
    /// Defaults to planted
    pub status: Option<LotStatus>,
}

/// Lots of one production, newest first
pub struct ListLotsUseCase<R>
where
    R: ProductionRepository + LotRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ListLotsUseCase<R>
where
    R: ProductionRepository + LotRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner: &UserId,
        production_id: &ProductionId,
    ) -> FarmResult<Vec<CoffeeLot>> {
        if self.repo.find_production(production_id, owner).await?.is_none() {
            return Err(FarmError::ProductionNotFound);
        }

        let mut lots = self.repo.list_lots(production_id).await?;
        lots.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(lots)
    }
}

pub struct CreateLotUseCase<R>
where
    R: ProductionRepository + LotRepository + CatalogRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<FarmConfig>,
}

impl<R> CreateLotUseCase<R>
where
    R: ProductionRepository + LotRepository + CatalogRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<FarmConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(
        &self,
        owner: UserId,
        production_id: ProductionId,
        input: LotInput,
    ) -> FarmResult<CoffeeLot> {
        let name = self.config.text("Lot name", &input.name)?;
        let plant_count = self.config.plant_count(input.plant_count)?;

        if self.repo.find_production(&production_id, &owner).await?.is_none() {
            return Err(FarmError::ProductionNotFound);
        }
        if let Some(variety_id) = &input.variety_id {
            if !self.repo.variety_exists(variety_id).await? {
                return Err(FarmError::UnknownVariety);
            }
        }

        let lot = CoffeeLot::plant(
            production_id,
            name,
            input.variety_id,
            plant_count,
            input.status.unwrap_or_default(),
        );
        self.repo.create_lot(&lot).await?;

        tracing::info!(
            production_id = %production_id,
            lot_id = %lot.id,
            plants = plant_count,
            "Coffee lot planted"
        );

        // read back for the variety name
        Ok(self.repo.find_lot(&lot.id, &owner).await?.unwrap_or(lot))
    }
}

/// Moves a lot to any stage and restarts its stage date
pub struct ChangeLotStageUseCase<R>
where
    R: LotRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ChangeLotStageUseCase<R>
where
    R: LotRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        owner: &UserId,
        lot_id: &CoffeeLotId,
        stage: LotStage,
    ) -> FarmResult<CoffeeLot> {
        let mut lot = self
            .repo
            .find_lot(lot_id, owner)
            .await?
            .ok_or(FarmError::LotNotFound)?;

        let previous = lot.stage;
        lot.enter_stage(stage);
        self.repo.update_lot_stage(&lot).await?;

        tracing::info!(
            lot_id = %lot.id,
            from = previous.code(),
            to = stage.code(),
            "Coffee lot stage changed"
        );

        Ok(lot)
    }
}
