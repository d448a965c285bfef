//! Catalog Use Cases

use std::sync::Arc;

use crate::domain::entities::{City, CoffeeVariety};
use crate::domain::repository::CatalogRepository;
use crate::error::FarmResult;

pub struct ListCitiesUseCase<R>
where
    R: CatalogRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ListCitiesUseCase<R>
where
    R: CatalogRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Ordered by state, then name
    pub async fn execute(&self) -> FarmResult<Vec<City>> {
        let mut cities = self.repo.list_cities().await?;
        cities.sort_by(|a, b| a.state.cmp(&b.state).then_with(|| a.name.cmp(&b.name)));
        Ok(cities)
    }
}

pub struct ListVarietiesUseCase<R>
where
    R: CatalogRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> ListVarietiesUseCase<R>
where
    R: CatalogRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> FarmResult<Vec<CoffeeVariety>> {
        let mut varieties = self.repo.list_varieties().await?;
        varieties.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(varieties)
    }
}
