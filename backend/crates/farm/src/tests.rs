//! Unit tests for the farm crate
//!
//! Use cases and the router run against an in-memory repository.

#[cfg(test)]
mod support {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use axum::body::Body;
    use axum::http::{Request, header};
    use axum::response::Response;
    use axum::{Extension, Router};
    use chrono::NaiveDate;
    use kernel::id::{CoffeeLotId, CoffeeVarietyId, ProductionId, UserId};
    use kernel::identity::CurrentUser;
    use tower::ServiceExt;

    use crate::application::ProfileInput;
    use crate::application::config::FarmConfig;
    use crate::domain::entities::{
        City, CoffeeLot, CoffeeVariety, Production, ProductionDetails, Profile, ProfileRecord,
    };
    use crate::domain::repository::{
        CatalogRepository, LotRepository, ProductionRepository, ProfileRepository,
    };
    use crate::domain::value_objects::{Coordinates, EducationLevel, IdType};
    use crate::error::FarmResult;
    use crate::presentation::handlers::FarmAppState;
    use crate::presentation::router::farm_router_generic;

    #[derive(Default)]
    pub struct Tables {
        pub profiles: HashMap<UserId, ProfileRecord>,
        pub cities: Vec<City>,
        pub varieties: Vec<CoffeeVariety>,
        pub productions: Vec<Production>,
        /// Insertion order, oldest first
        pub lots: Vec<CoffeeLot>,
    }

    #[derive(Default)]
    pub struct FakeRepo {
        pub tables: Mutex<Tables>,
    }

    impl FakeRepo {
        pub fn seeded() -> Self {
            let repo = Self::default();
            {
                let mut tables = repo.tables.lock().unwrap();
                tables.cities = vec![
                    City {
                        id: 1,
                        name: "Manizales".to_string(),
                        state: "Caldas".to_string(),
                    },
                    City {
                        id: 2,
                        name: "Chinchiná".to_string(),
                        state: "Caldas".to_string(),
                    },
                    City {
                        id: 3,
                        name: "Armenia".to_string(),
                        state: "Quindío".to_string(),
                    },
                ];
                tables.varieties = vec![
                    CoffeeVariety {
                        id: CoffeeVarietyId::new(),
                        name: "Castillo".to_string(),
                    },
                    CoffeeVariety {
                        id: CoffeeVarietyId::new(),
                        name: "Caturra".to_string(),
                    },
                ];
            }
            repo
        }

        pub fn variety(&self, name: &str) -> CoffeeVarietyId {
            let tables = self.tables.lock().unwrap();
            tables
                .varieties
                .iter()
                .find(|v| v.name == name)
                .map(|v| v.id)
                .unwrap()
        }

        fn owns(tables: &Tables, production_id: &ProductionId, owner: &UserId) -> bool {
            tables
                .productions
                .iter()
                .any(|p| p.id == *production_id && p.owner == *owner)
        }

        fn with_variety_name(tables: &Tables, lot: &CoffeeLot) -> CoffeeLot {
            let mut lot = lot.clone();
            lot.variety_name = lot.variety_id.and_then(|id| {
                tables
                    .varieties
                    .iter()
                    .find(|v| v.id == id)
                    .map(|v| v.name.clone())
            });
            lot
        }
    }

    impl ProfileRepository for FakeRepo {
        async fn find_profile(&self, user_id: &UserId) -> FarmResult<Option<Profile>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.profiles.get(user_id).map(|record| Profile {
                id: record.id,
                first_name: record.first_name.clone(),
                last_name: record.last_name.clone(),
                id_type: record.id_type,
                id_number: record.id_number.clone(),
                phone: record.phone.clone(),
                birth_date: record.birth_date,
                city: tables
                    .cities
                    .iter()
                    .find(|c| c.id == record.city_id)
                    .cloned()
                    .unwrap(),
                education_level: record.education_level,
                updated_at: record.updated_at,
            }))
        }

        async fn profile_exists(&self, user_id: &UserId) -> FarmResult<bool> {
            Ok(self.tables.lock().unwrap().profiles.contains_key(user_id))
        }

        async fn upsert_profile(&self, profile: &ProfileRecord) -> FarmResult<()> {
            let mut tables = self.tables.lock().unwrap();
            tables.profiles.insert(profile.id, profile.clone());
            Ok(())
        }

        async fn update_profile(&self, profile: &ProfileRecord) -> FarmResult<bool> {
            let mut tables = self.tables.lock().unwrap();
            match tables.profiles.get_mut(&profile.id) {
                Some(existing) => {
                    *existing = profile.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    impl CatalogRepository for FakeRepo {
        async fn list_cities(&self) -> FarmResult<Vec<City>> {
            Ok(self.tables.lock().unwrap().cities.clone())
        }

        async fn find_city(&self, name: &str, state: &str) -> FarmResult<Option<City>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .cities
                .iter()
                .find(|c| c.name == name && c.state == state)
                .cloned())
        }

        async fn list_varieties(&self) -> FarmResult<Vec<CoffeeVariety>> {
            Ok(self.tables.lock().unwrap().varieties.clone())
        }

        async fn variety_exists(&self, variety_id: &CoffeeVarietyId) -> FarmResult<bool> {
            let tables = self.tables.lock().unwrap();
            Ok(tables.varieties.iter().any(|v| v.id == *variety_id))
        }
    }

    impl ProductionRepository for FakeRepo {
        async fn list_productions(&self, owner: &UserId) -> FarmResult<Vec<Production>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .productions
                .iter()
                .filter(|p| p.owner == *owner)
                .cloned()
                .collect())
        }

        async fn find_production(
            &self,
            production_id: &ProductionId,
            owner: &UserId,
        ) -> FarmResult<Option<Production>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .productions
                .iter()
                .find(|p| p.id == *production_id && p.owner == *owner)
                .cloned())
        }

        async fn create_production(&self, production: &Production) -> FarmResult<()> {
            self.tables.lock().unwrap().productions.push(production.clone());
            Ok(())
        }

        async fn update_production(&self, production: &Production) -> FarmResult<bool> {
            let mut tables = self.tables.lock().unwrap();
            match tables
                .productions
                .iter_mut()
                .find(|p| p.id == production.id && p.owner == production.owner)
            {
                Some(existing) => {
                    *existing = production.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_production(
            &self,
            production_id: &ProductionId,
            owner: &UserId,
        ) -> FarmResult<bool> {
            let mut tables = self.tables.lock().unwrap();
            if !Self::owns(&tables, production_id, owner) {
                return Ok(false);
            }
            tables.productions.retain(|p| p.id != *production_id);
            tables.lots.retain(|l| l.production_id != *production_id);
            Ok(true)
        }
    }

    impl LotRepository for FakeRepo {
        async fn list_lots(&self, production_id: &ProductionId) -> FarmResult<Vec<CoffeeLot>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .lots
                .iter()
                .filter(|l| l.production_id == *production_id)
                .map(|l| Self::with_variety_name(&tables, l))
                .collect())
        }

        async fn list_owner_lots(&self, owner: &UserId) -> FarmResult<Vec<CoffeeLot>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .lots
                .iter()
                .filter(|l| Self::owns(&tables, &l.production_id, owner))
                .map(|l| Self::with_variety_name(&tables, l))
                .collect())
        }

        async fn find_lot(
            &self,
            lot_id: &CoffeeLotId,
            owner: &UserId,
        ) -> FarmResult<Option<CoffeeLot>> {
            let tables = self.tables.lock().unwrap();
            Ok(tables
                .lots
                .iter()
                .find(|l| l.id == *lot_id && Self::owns(&tables, &l.production_id, owner))
                .map(|l| Self::with_variety_name(&tables, l)))
        }

        async fn create_lot(&self, lot: &CoffeeLot) -> FarmResult<()> {
            self.tables.lock().unwrap().lots.push(lot.clone());
            Ok(())
        }

        async fn update_lot_stage(&self, lot: &CoffeeLot) -> FarmResult<()> {
            let mut tables = self.tables.lock().unwrap();
            if let Some(existing) = tables.lots.iter_mut().find(|l| l.id == lot.id) {
                existing.stage = lot.stage;
                existing.stage_date = lot.stage_date;
            }
            Ok(())
        }
    }

    pub fn profile_input() -> ProfileInput {
        ProfileInput {
            first_name: "Ana".to_string(),
            last_name: "Giraldo".to_string(),
            id_type: IdType::Cc,
            id_number: "1053847261".to_string(),
            phone: "+57 310 555 0101".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1984, 3, 9).unwrap(),
            state: "Caldas".to_string(),
            city: "Chinchiná".to_string(),
            education_level: EducationLevel::Tecnico,
        }
    }

    /// Production already stored for the owner
    pub fn add_production(repo: &FakeRepo, owner: UserId) -> Production {
        let production = Production::new(
            owner,
            ProductionDetails {
                farm_name: "La Esperanza".to_string(),
                farm_area: 3.5,
                farm_location: "Vereda La Floresta".to_string(),
                plantation_age: 6,
                coordinates: Coordinates::new(4.98, -75.6).unwrap(),
            },
        );
        repo.tables.lock().unwrap().productions.push(production.clone());
        production
    }

    pub fn current_user(user_id: UserId) -> CurrentUser {
        CurrentUser::new(user_id, Some("ana@finca.co".to_string()), true)
    }

    /// Farm API as mounted under `/api`, with the caller already resolved
    pub fn api(repo: Arc<FakeRepo>, user: CurrentUser) -> Router {
        let state = FarmAppState {
            repo,
            config: Arc::new(FarmConfig::default()),
        };
        Router::new()
            .nest("/api", farm_router_generic(state))
            .layer(Extension(user))
    }

    pub async fn send(
        app: Router,
        method: &str,
        uri: &str,
        json: Option<serde_json::Value>,
    ) -> Response {
        let body = match json {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    pub async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use kernel::id::{CoffeeLotId, UserId};

    use super::support::*;
    use crate::application::config::FarmConfig;
    use crate::application::*;
    use crate::domain::entities::CoffeeLot;
    use crate::domain::value_objects::{LotStage, LotStatus};
    use crate::error::FarmError;

    fn config() -> Arc<FarmConfig> {
        Arc::new(FarmConfig::default())
    }

    fn production_input(coordinates: &str) -> ProductionInput {
        ProductionInput {
            farm_name: "El Mirador".to_string(),
            farm_area: 2.0,
            farm_location: "Vereda Alto Bonito".to_string(),
            plantation_age: 3,
            coordinates: coordinates.to_string(),
        }
    }

    #[test]
    fn test_complete_profile_resolves_city() {
        let repo = Arc::new(FakeRepo::seeded());
        let user = UserId::new();

        let profile = tokio_test::block_on(
            CompleteProfileUseCase::new(repo.clone(), config()).execute(user, profile_input()),
        )
        .unwrap();

        assert_eq!(profile.id, user);
        assert_eq!(profile.city.name, "Chinchiná");
        assert_eq!(profile.city.state, "Caldas");
    }

    #[test]
    fn test_complete_profile_unknown_city() {
        let repo = Arc::new(FakeRepo::seeded());
        let mut input = profile_input();
        input.city = "Chinchiná".to_string();
        input.state = "Quindío".to_string();

        let result = tokio_test::block_on(
            CompleteProfileUseCase::new(repo, config()).execute(UserId::new(), input),
        );

        assert!(matches!(result, Err(FarmError::UnknownCity { .. })));
    }

    #[test]
    fn test_update_profile_requires_existing() {
        let repo = Arc::new(FakeRepo::seeded());

        let result = tokio_test::block_on(
            UpdateProfileUseCase::new(repo, config()).execute(UserId::new(), profile_input()),
        );

        assert!(matches!(result, Err(FarmError::ProfileNotFound)));
    }

    #[test]
    fn test_update_profile_changes_fields() {
        let repo = Arc::new(FakeRepo::seeded());
        let user = UserId::new();
        tokio_test::block_on(
            CompleteProfileUseCase::new(repo.clone(), config()).execute(user, profile_input()),
        )
        .unwrap();

        let mut input = profile_input();
        input.city = "Armenia".to_string();
        input.state = "Quindío".to_string();
        let profile =
            tokio_test::block_on(UpdateProfileUseCase::new(repo, config()).execute(user, input))
                .unwrap();

        assert_eq!(profile.city.name, "Armenia");
    }

    #[test]
    fn test_production_requires_profile() {
        let repo = Arc::new(FakeRepo::seeded());

        let result = tokio_test::block_on(
            CreateProductionUseCase::new(repo.clone(), config())
                .execute(UserId::new(), production_input("4.98,-75.6")),
        );

        assert!(matches!(result, Err(FarmError::ProfileRequired)));
        assert!(repo.tables.lock().unwrap().productions.is_empty());
    }

    #[test]
    fn test_production_validates_coordinates() {
        let repo = Arc::new(FakeRepo::seeded());

        let result = tokio_test::block_on(
            CreateProductionUseCase::new(repo, config())
                .execute(UserId::new(), production_input("somewhere in Caldas")),
        );

        assert!(matches!(result, Err(FarmError::Validation(_))));
    }

    #[test]
    fn test_foreign_production_is_not_found() {
        let repo = Arc::new(FakeRepo::seeded());
        let production = add_production(&repo, UserId::new());
        let intruder = UserId::new();

        let updated = tokio_test::block_on(
            UpdateProductionUseCase::new(repo.clone(), config()).execute(
                intruder,
                production.id,
                production_input("4.98,-75.6"),
            ),
        );
        let deleted = tokio_test::block_on(
            DeleteProductionUseCase::new(repo.clone()).execute(&intruder, &production.id),
        );
        let lots = tokio_test::block_on(
            ListLotsUseCase::new(repo.clone()).execute(&intruder, &production.id),
        );

        assert!(matches!(updated, Err(FarmError::ProductionNotFound)));
        assert!(matches!(deleted, Err(FarmError::ProductionNotFound)));
        assert!(matches!(lots, Err(FarmError::ProductionNotFound)));
        assert_eq!(repo.tables.lock().unwrap().productions.len(), 1);
    }

    #[test]
    fn test_delete_production_removes_lots() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);
        tokio_test::block_on(CreateLotUseCase::new(repo.clone(), config()).execute(
            owner,
            production.id,
            LotInput {
                name: "Lote 1".to_string(),
                variety_id: None,
                plant_count: 800,
                status: None,
            },
        ))
        .unwrap();

        tokio_test::block_on(DeleteProductionUseCase::new(repo.clone()).execute(&owner, &production.id))
            .unwrap();

        let tables = repo.tables.lock().unwrap();
        assert!(tables.productions.is_empty());
        assert!(tables.lots.is_empty());
    }

    #[test]
    fn test_new_lot_is_sown_with_variety_name() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);
        let castillo = repo.variety("Castillo");

        let lot = tokio_test::block_on(CreateLotUseCase::new(repo.clone(), config()).execute(
            owner,
            production.id,
            LotInput {
                name: " Lote El Guamo ".to_string(),
                variety_id: Some(castillo),
                plant_count: 1500,
                status: None,
            },
        ))
        .unwrap();

        assert_eq!(lot.name, "Lote El Guamo");
        assert_eq!(lot.stage, LotStage::Sown);
        assert_eq!(lot.status, LotStatus::Planted);
        assert_eq!(lot.variety_name.as_deref(), Some("Castillo"));
    }

    #[test]
    fn test_lot_may_start_without_plants() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);
        let lot_input = |plant_count| LotInput {
            name: "Lote vivero".to_string(),
            variety_id: None,
            plant_count,
            status: None,
        };

        let lot = tokio_test::block_on(
            CreateLotUseCase::new(repo.clone(), config()).execute(owner, production.id, lot_input(0)),
        )
        .unwrap();
        assert_eq!(lot.plant_count, 0);

        let result = tokio_test::block_on(
            CreateLotUseCase::new(repo.clone(), config()).execute(owner, production.id, lot_input(-1)),
        );
        assert!(matches!(result, Err(FarmError::Validation(_))));
        assert_eq!(repo.tables.lock().unwrap().lots.len(), 1);
    }

    #[test]
    fn test_lot_with_unknown_variety_is_rejected() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);

        let result = tokio_test::block_on(CreateLotUseCase::new(repo, config()).execute(
            owner,
            production.id,
            LotInput {
                name: "Lote 2".to_string(),
                variety_id: Some(kernel::id::CoffeeVarietyId::new()),
                plant_count: 10,
                status: Some(LotStatus::Growing),
            },
        ));

        assert!(matches!(result, Err(FarmError::UnknownVariety)));
    }

    #[test]
    fn test_lots_are_listed_newest_first() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);
        {
            let mut tables = repo.tables.lock().unwrap();
            for (days_ago, name) in [(10, "old"), (1, "new"), (5, "middle")] {
                let mut lot = CoffeeLot::plant(
                    production.id,
                    name.to_string(),
                    None,
                    100,
                    LotStatus::default(),
                );
                lot.created_at = Utc::now() - Duration::days(days_ago);
                tables.lots.push(lot);
            }
        }

        let lots =
            tokio_test::block_on(ListLotsUseCase::new(repo).execute(&owner, &production.id))
                .unwrap();

        let names: Vec<_> = lots.iter().map(|lot| lot.name.as_str()).collect();
        assert_eq!(names, vec!["new", "middle", "old"]);
    }

    #[test]
    fn test_change_stage_restarts_stage_date() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);
        let lot_id = {
            let mut tables = repo.tables.lock().unwrap();
            let mut lot =
                CoffeeLot::plant(production.id, "Lote".to_string(), None, 100, LotStatus::default());
            lot.stage_date = Utc::now() - Duration::days(90);
            let id = lot.id;
            tables.lots.push(lot);
            id
        };

        let lot = tokio_test::block_on(
            ChangeLotStageUseCase::new(repo.clone()).execute(&owner, &lot_id, LotStage::Flowering),
        )
        .unwrap();

        assert_eq!(lot.stage, LotStage::Flowering);
        assert!(Utc::now() - lot.stage_date < Duration::minutes(1));
        let stored = repo.tables.lock().unwrap().lots[0].clone();
        assert_eq!(stored.stage, LotStage::Flowering);
    }

    #[test]
    fn test_change_stage_of_foreign_lot_is_not_found() {
        let repo = Arc::new(FakeRepo::seeded());
        let production = add_production(&repo, UserId::new());
        let lot = CoffeeLot::plant(production.id, "Lote".to_string(), None, 100, LotStatus::default());
        let lot_id = lot.id;
        repo.tables.lock().unwrap().lots.push(lot);

        let foreign = tokio_test::block_on(
            ChangeLotStageUseCase::new(repo.clone()).execute(&UserId::new(), &lot_id, LotStage::Harvest),
        );
        let missing = tokio_test::block_on(
            ChangeLotStageUseCase::new(repo).execute(&UserId::new(), &CoffeeLotId::new(), LotStage::Harvest),
        );

        assert!(matches!(foreign, Err(FarmError::LotNotFound)));
        assert!(matches!(missing, Err(FarmError::LotNotFound)));
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use kernel::id::UserId;
    use serde_json::json;

    use super::support::*;

    fn profile_json() -> serde_json::Value {
        json!({
            "firstName": "Ana",
            "lastName": "Giraldo",
            "idType": "cc",
            "idNumber": "1053847261",
            "phone": "3105550101",
            "birthDate": "1984-03-09",
            "state": "Caldas",
            "city": "Manizales",
            "educationLevel": "universitario"
        })
    }

    fn production_json() -> serde_json::Value {
        json!({
            "farmName": "La Cristalina",
            "farmArea": 4.25,
            "farmLocation": "Vereda Java",
            "plantationAge": 8,
            "coordinates": "5.0703,-75.5138"
        })
    }

    #[tokio::test]
    async fn test_profile_lifecycle() {
        let repo = Arc::new(FakeRepo::seeded());
        let user = current_user(UserId::new());

        let missing = send(api(repo.clone(), user.clone()), "GET", "/api/profile", None).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let created = send(
            api(repo.clone(), user.clone()),
            "POST",
            "/api/profile",
            Some(profile_json()),
        )
        .await;
        assert_eq!(created.status(), StatusCode::OK);

        let fetched = send(api(repo, user), "GET", "/api/profile", None).await;
        assert_eq!(fetched.status(), StatusCode::OK);
        let body = body_json(fetched).await;
        assert_eq!(body["city"]["name"], "Manizales");
        assert_eq!(body["educationLevel"], "universitario");
    }

    #[tokio::test]
    async fn test_unknown_city_is_422() {
        let repo = Arc::new(FakeRepo::seeded());
        let mut body = profile_json();
        body["city"] = json!("Macondo");

        let response = send(
            api(repo, current_user(UserId::new())),
            "POST",
            "/api/profile",
            Some(body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_catalog_is_sorted() {
        let repo = Arc::new(FakeRepo::seeded());

        let response = send(
            api(repo, current_user(UserId::new())),
            "GET",
            "/api/catalog/cities",
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let names: Vec<_> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|city| city["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["Chinchiná", "Manizales", "Armenia"]);
    }

    #[tokio::test]
    async fn test_create_and_list_productions() {
        let repo = Arc::new(FakeRepo::seeded());
        let user = current_user(UserId::new());
        send(
            api(repo.clone(), user.clone()),
            "POST",
            "/api/profile",
            Some(profile_json()),
        )
        .await;

        let created = send(
            api(repo.clone(), user.clone()),
            "POST",
            "/api/productions",
            Some(production_json()),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let created = body_json(created).await;
        assert_eq!(created["coordinates"], "5.0703,-75.5138");
        assert_eq!(created["latitude"], 5.0703);

        let listed = send(api(repo, user), "GET", "/api/productions", None).await;
        let listed = body_json(listed).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["farmName"], "La Cristalina");
    }

    #[tokio::test]
    async fn test_production_without_profile_is_422() {
        let repo = Arc::new(FakeRepo::seeded());

        let response = send(
            api(repo, current_user(UserId::new())),
            "POST",
            "/api/productions",
            Some(production_json()),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_bad_coordinates_is_400() {
        let repo = Arc::new(FakeRepo::seeded());
        let mut body = production_json();
        body["coordinates"] = json!("95,-75");

        let response = send(
            api(repo, current_user(UserId::new())),
            "POST",
            "/api/productions",
            Some(body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_foreign_production_is_404() {
        let repo = Arc::new(FakeRepo::seeded());
        let production = add_production(&repo, UserId::new());

        let response = send(
            api(repo, current_user(UserId::new())),
            "DELETE",
            &format!("/api/productions/{}", production.id),
            None,
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_lot_flow_and_dashboard() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let user = current_user(owner);
        let production = add_production(&repo, owner);
        let caturra = repo.variety("Caturra");

        let created = send(
            api(repo.clone(), user.clone()),
            "POST",
            &format!("/api/productions/{}/lots", production.id),
            Some(json!({ "name": "Lote Alto", "varietyId": caturra, "plantCount": 2000 })),
        )
        .await;
        assert_eq!(created.status(), StatusCode::CREATED);
        let lot = body_json(created).await;
        assert_eq!(lot["stage"], "Sembrado");
        assert_eq!(lot["status"], "Plantado");
        assert_eq!(lot["varietyName"], "Caturra");

        let moved = send(
            api(repo.clone(), user.clone()),
            "PATCH",
            &format!("/api/lots/{}/stage", lot["id"].as_str().unwrap()),
            Some(json!({ "stage": "Floración" })),
        )
        .await;
        assert_eq!(moved.status(), StatusCode::OK);
        assert_eq!(body_json(moved).await["stage"], "Floración");

        let summary = send(api(repo, user), "GET", "/api/dashboard/summary", None).await;
        assert_eq!(summary.status(), StatusCode::OK);
        let summary = body_json(summary).await;
        assert_eq!(summary["productionCount"], 1);
        assert_eq!(summary["totalPlants"], 2000);
        let stages = summary["lotsPerStage"].as_array().unwrap();
        assert_eq!(stages.len(), 7);
        assert_eq!(stages[3], json!({ "stage": "Floración", "lots": 1 }));
        assert_eq!(stages[0], json!({ "stage": "Sembrado", "lots": 0 }));
        assert_eq!(
            summary["plantsPerVariety"],
            json!([{ "variety": "Caturra", "plants": 2000 }])
        );
    }

    #[tokio::test]
    async fn test_unknown_stage_is_rejected() {
        let repo = Arc::new(FakeRepo::seeded());
        let owner = UserId::new();
        let production = add_production(&repo, owner);

        let response = send(
            api(repo, current_user(owner)),
            "PATCH",
            &format!("/api/lots/{}/stage", production.id),
            Some(json!({ "stage": "Tostado" })),
        )
        .await;

        assert!(response.status().is_client_error());
    }
}
