//! Dashboard Summary Use Case

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::repository::{LotRepository, ProductionRepository};
use crate::domain::services::{DashboardSummary, summarize};
use crate::error::FarmResult;

pub struct DashboardSummaryUseCase<R>
where
    R: ProductionRepository + LotRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> DashboardSummaryUseCase<R>
where
    R: ProductionRepository + LotRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, owner: &UserId) -> FarmResult<DashboardSummary> {
        let productions = self.repo.list_productions(owner).await?;
        let lots = self.repo.list_owner_lots(owner).await?;
        Ok(summarize(&productions, &lots))
    }
}
