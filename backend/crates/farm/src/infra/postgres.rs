//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{CoffeeLotId, CoffeeVarietyId, ProductionId, UserId};
use sqlx::PgPool;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::entities::{
    City, CoffeeLot, CoffeeVariety, Production, ProductionDetails, Profile, ProfileRecord,
};
use crate::domain::repository::{
    CatalogRepository, LotRepository, ProductionRepository, ProfileRepository,
};
use crate::domain::value_objects::{Coordinates, EducationLevel, IdType, LotStage, LotStatus};
use crate::error::{FarmError, FarmResult};

const LOT_COLUMNS: &str = r#"
    l.id,
    l.production_id,
    l.name,
    l.variety_id,
    v.name AS variety_name,
    l.plant_count,
    l.stage,
    l.stage_date,
    l.status,
    l.created_at
"#;

/// PostgreSQL-backed repository for every farm table
#[derive(Clone)]
pub struct PgFarmRepository {
    pool: PgPool,
}

impl PgFarmRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl ProfileRepository for PgFarmRepository {
    async fn find_profile(&self, user_id: &UserId) -> FarmResult<Option<Profile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            SELECT
                p.id,
                p.first_name,
                p.last_name,
                t.code AS id_type,
                p.id_number,
                p.phone,
                p.birth_date,
                c.id AS city_id,
                c.name AS city_name,
                c.state AS city_state,
                e.code AS education_level,
                p.updated_at
            FROM profiles p
            JOIN id_types t ON t.id = p.id_type_id
            JOIN cities c ON c.id = p.city_id
            JOIN education_levels e ON e.id = p.education_level_id
            WHERE p.id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProfileRow::into_profile).transpose()
    }

    async fn profile_exists(&self, user_id: &UserId) -> FarmResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM profiles WHERE id = $1)")
                .bind(user_id.as_uuid())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn upsert_profile(&self, profile: &ProfileRecord) -> FarmResult<()> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles (
                id,
                first_name,
                last_name,
                id_type_id,
                id_number,
                phone,
                birth_date,
                city_id,
                education_level_id,
                updated_at
            )
            SELECT $1, $2, $3, t.id, $5, $6, $7, $8, e.id, $10
            FROM id_types t, education_levels e
            WHERE t.code = $4 AND e.code = $9
            ON CONFLICT (id) DO UPDATE SET
                first_name = EXCLUDED.first_name,
                last_name = EXCLUDED.last_name,
                id_type_id = EXCLUDED.id_type_id,
                id_number = EXCLUDED.id_number,
                phone = EXCLUDED.phone,
                birth_date = EXCLUDED.birth_date,
                city_id = EXCLUDED.city_id,
                education_level_id = EXCLUDED.education_level_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.id_type.code())
        .bind(&profile.id_number)
        .bind(&profile.phone)
        .bind(profile.birth_date)
        .bind(profile.city_id)
        .bind(profile.education_level.code())
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(FarmError::Internal(format!(
                "Reference data missing for id type {} or education level {}",
                profile.id_type.code(),
                profile.education_level.code()
            )));
        }

        Ok(())
    }

    async fn update_profile(&self, profile: &ProfileRecord) -> FarmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                first_name = $2,
                last_name = $3,
                id_type_id = (SELECT id FROM id_types WHERE code = $4),
                id_number = $5,
                phone = $6,
                birth_date = $7,
                city_id = $8,
                education_level_id = (SELECT id FROM education_levels WHERE code = $9),
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.id_type.code())
        .bind(&profile.id_number)
        .bind(&profile.phone)
        .bind(profile.birth_date)
        .bind(profile.city_id)
        .bind(profile.education_level.code())
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl CatalogRepository for PgFarmRepository {
    async fn list_cities(&self) -> FarmResult<Vec<City>> {
        let rows = sqlx::query_as::<_, CityRow>(
            "SELECT id, name, state FROM cities ORDER BY state, name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CityRow::into_city).collect())
    }

    async fn find_city(&self, name: &str, state: &str) -> FarmResult<Option<City>> {
        let row = sqlx::query_as::<_, CityRow>(
            "SELECT id, name, state FROM cities WHERE name = $1 AND state = $2",
        )
        .bind(name)
        .bind(state)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CityRow::into_city))
    }

    async fn list_varieties(&self) -> FarmResult<Vec<CoffeeVariety>> {
        let rows = sqlx::query_as::<_, VarietyRow>(
            "SELECT id, name FROM coffee_varieties ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CoffeeVariety {
                id: CoffeeVarietyId::from_uuid(row.id),
                name: row.name,
            })
            .collect())
    }

    async fn variety_exists(&self, variety_id: &CoffeeVarietyId) -> FarmResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM coffee_varieties WHERE id = $1)",
        )
        .bind(variety_id.as_uuid())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}

impl ProductionRepository for PgFarmRepository {
    async fn list_productions(&self, owner: &UserId) -> FarmResult<Vec<Production>> {
        let rows = sqlx::query_as::<_, ProductionRow>(
            r#"
            SELECT
                id,
                profile_id,
                farm_name,
                farm_area,
                farm_location,
                plantation_age,
                coordinates,
                created_at
            FROM coffee_productions
            WHERE profile_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(ProductionRow::into_production).collect()
    }

    async fn find_production(
        &self,
        production_id: &ProductionId,
        owner: &UserId,
    ) -> FarmResult<Option<Production>> {
        let row = sqlx::query_as::<_, ProductionRow>(
            r#"
            SELECT
                id,
                profile_id,
                farm_name,
                farm_area,
                farm_location,
                plantation_age,
                coordinates,
                created_at
            FROM coffee_productions
            WHERE id = $1 AND profile_id = $2
            "#,
        )
        .bind(production_id.as_uuid())
        .bind(owner.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ProductionRow::into_production).transpose()
    }

    async fn create_production(&self, production: &Production) -> FarmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO coffee_productions (
                id,
                profile_id,
                farm_name,
                farm_area,
                farm_location,
                plantation_age,
                coordinates,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(production.id.as_uuid())
        .bind(production.owner.as_uuid())
        .bind(&production.details.farm_name)
        .bind(production.details.farm_area)
        .bind(&production.details.farm_location)
        .bind(production.details.plantation_age)
        .bind(production.details.coordinates.to_string())
        .bind(production.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_production(&self, production: &Production) -> FarmResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE coffee_productions SET
                farm_name = $3,
                farm_area = $4,
                farm_location = $5,
                plantation_age = $6,
                coordinates = $7
            WHERE id = $1 AND profile_id = $2
            "#,
        )
        .bind(production.id.as_uuid())
        .bind(production.owner.as_uuid())
        .bind(&production.details.farm_name)
        .bind(production.details.farm_area)
        .bind(&production.details.farm_location)
        .bind(production.details.plantation_age)
        .bind(production.details.coordinates.to_string())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_production(
        &self,
        production_id: &ProductionId,
        owner: &UserId,
    ) -> FarmResult<bool> {
        // coffee_lots rows go through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM coffee_productions WHERE id = $1 AND profile_id = $2")
            .bind(production_id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

impl LotRepository for PgFarmRepository {
    async fn list_lots(&self, production_id: &ProductionId) -> FarmResult<Vec<CoffeeLot>> {
        let sql = format!(
            r#"
            SELECT {LOT_COLUMNS}
            FROM coffee_lots l
            LEFT JOIN coffee_varieties v ON v.id = l.variety_id
            WHERE l.production_id = $1
            ORDER BY l.created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, LotRow>(&sql)
            .bind(production_id.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(LotRow::into_lot).collect()
    }

    async fn list_owner_lots(&self, owner: &UserId) -> FarmResult<Vec<CoffeeLot>> {
        let sql = format!(
            r#"
            SELECT {LOT_COLUMNS}
            FROM coffee_lots l
            JOIN coffee_productions p ON p.id = l.production_id
            LEFT JOIN coffee_varieties v ON v.id = l.variety_id
            WHERE p.profile_id = $1
            ORDER BY l.created_at DESC
            "#
        );
        let rows = sqlx::query_as::<_, LotRow>(&sql)
            .bind(owner.as_uuid())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(LotRow::into_lot).collect()
    }

    async fn find_lot(&self, lot_id: &CoffeeLotId, owner: &UserId) -> FarmResult<Option<CoffeeLot>> {
        let sql = format!(
            r#"
            SELECT {LOT_COLUMNS}
            FROM coffee_lots l
            JOIN coffee_productions p ON p.id = l.production_id
            LEFT JOIN coffee_varieties v ON v.id = l.variety_id
            WHERE l.id = $1 AND p.profile_id = $2
            "#
        );
        let row = sqlx::query_as::<_, LotRow>(&sql)
            .bind(lot_id.as_uuid())
            .bind(owner.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(LotRow::into_lot).transpose()
    }

    async fn create_lot(&self, lot: &CoffeeLot) -> FarmResult<()> {
        sqlx::query(
            r#"
            INSERT INTO coffee_lots (
                id,
                production_id,
                name,
                variety_id,
                plant_count,
                stage,
                stage_date,
                status,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(lot.id.as_uuid())
        .bind(lot.production_id.as_uuid())
        .bind(&lot.name)
        .bind(lot.variety_id.map(|id| id.into_uuid()))
        .bind(lot.plant_count)
        .bind(lot.stage.code())
        .bind(lot.stage_date)
        .bind(lot.status.code())
        .bind(lot.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_lot_stage(&self, lot: &CoffeeLot) -> FarmResult<()> {
        sqlx::query("UPDATE coffee_lots SET stage = $2, stage_date = $3 WHERE id = $1")
            .bind(lot.id.as_uuid())
            .bind(lot.stage.code())
            .bind(lot.stage_date)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Row types
// ============================================================================

fn parse_code<T>(column: &str, value: &str) -> FarmResult<T>
where
    T: FromStr,
{
    value
        .parse()
        .map_err(|_| FarmError::Internal(format!("Invalid {} in database: {}", column, value)))
}

#[derive(sqlx::FromRow)]
struct ProfileRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    id_type: String,
    id_number: String,
    phone: String,
    birth_date: NaiveDate,
    city_id: i32,
    city_name: String,
    city_state: String,
    education_level: String,
    updated_at: DateTime<Utc>,
}

impl ProfileRow {
    fn into_profile(self) -> FarmResult<Profile> {
        Ok(Profile {
            id: UserId::from_uuid(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            id_type: parse_code::<IdType>("id type", &self.id_type)?,
            id_number: self.id_number,
            phone: self.phone,
            birth_date: self.birth_date,
            city: City {
                id: self.city_id,
                name: self.city_name,
                state: self.city_state,
            },
            education_level: parse_code::<EducationLevel>("education level", &self.education_level)?,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct CityRow {
    id: i32,
    name: String,
    state: String,
}

impl CityRow {
    fn into_city(self) -> City {
        City {
            id: self.id,
            name: self.name,
            state: self.state,
        }
    }
}

#[derive(sqlx::FromRow)]
struct VarietyRow {
    id: Uuid,
    name: String,
}

#[derive(sqlx::FromRow)]
struct ProductionRow {
    id: Uuid,
    profile_id: Uuid,
    farm_name: String,
    farm_area: f64,
    farm_location: String,
    plantation_age: i32,
    coordinates: String,
    created_at: DateTime<Utc>,
}

impl ProductionRow {
    fn into_production(self) -> FarmResult<Production> {
        Ok(Production {
            id: ProductionId::from_uuid(self.id),
            owner: UserId::from_uuid(self.profile_id),
            details: ProductionDetails {
                farm_name: self.farm_name,
                farm_area: self.farm_area,
                farm_location: self.farm_location,
                plantation_age: self.plantation_age,
                coordinates: parse_code::<Coordinates>("coordinates", &self.coordinates)?,
            },
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct LotRow {
    id: Uuid,
    production_id: Uuid,
    name: String,
    variety_id: Option<Uuid>,
    variety_name: Option<String>,
    plant_count: i32,
    stage: String,
    stage_date: DateTime<Utc>,
    status: String,
    created_at: DateTime<Utc>,
}

impl LotRow {
    fn into_lot(self) -> FarmResult<CoffeeLot> {
        Ok(CoffeeLot {
            id: CoffeeLotId::from_uuid(self.id),
            production_id: ProductionId::from_uuid(self.production_id),
            name: self.name,
            variety_id: self.variety_id.map(CoffeeVarietyId::from_uuid),
            variety_name: self.variety_name,
            plant_count: self.plant_count,
            stage: parse_code::<LotStage>("lot stage", &self.stage)?,
            stage_date: self.stage_date,
            status: parse_code::<LotStatus>("lot status", &self.status)?,
            created_at: self.created_at,
        })
    }
}
