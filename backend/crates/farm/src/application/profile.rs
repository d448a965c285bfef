//! Profile Use Cases
//!
//! Read, complete and edit the producer profile. Completing the profile is
//! what ends on-boarding for the session gate.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use kernel::error::app_error::AppError;
use kernel::id::UserId;

use crate::application::config::FarmConfig;
use crate::domain::entities::{Profile, ProfileRecord};
use crate::domain::repository::{CatalogRepository, ProfileRepository};
use crate::domain::value_objects::{EducationLevel, IdType};
use crate::error::{FarmError, FarmResult};

/// Profile form fields
#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub phone: String,
    pub birth_date: NaiveDate,
    /// Department of the city
    pub state: String,
    pub city: String,
    pub education_level: EducationLevel,
}

fn phone(value: &str) -> FarmResult<String> {
    let value = value.trim();
    let digits = value.chars().filter(char::is_ascii_digit).count();
    let allowed = value
        .chars()
        .enumerate()
        .all(|(i, c)| c.is_ascii_digit() || c == ' ' || c == '-' || (i == 0 && c == '+'));
    if !allowed || !(7..=15).contains(&digits) {
        return Err(AppError::bad_request("Phone number must have 7 to 15 digits")
            .with_action("Example: +57 310 555 0101")
            .into());
    }
    Ok(value.to_string())
}

fn id_number(config: &FarmConfig, value: &str) -> FarmResult<String> {
    let value = config.text("Document number", value)?;
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::bad_request("Document number must be letters and digits only").into());
    }
    Ok(value)
}

fn birth_date(value: NaiveDate) -> FarmResult<NaiveDate> {
    if value >= Utc::now().date_naive() {
        return Err(AppError::bad_request("Birth date must be in the past").into());
    }
    Ok(value)
}

/// Validate the form and resolve the city into a storable record
async fn build_record<R>(
    repo: &R,
    config: &FarmConfig,
    user_id: UserId,
    input: ProfileInput,
) -> FarmResult<ProfileRecord>
where
    R: CatalogRepository + Send + Sync,
{
    let first_name = config.text("First name", &input.first_name)?;
    let last_name = config.text("Last name", &input.last_name)?;
    let id_number = id_number(config, &input.id_number)?;
    let phone = phone(&input.phone)?;
    let birth_date = birth_date(input.birth_date)?;
    let state = config.text("State", &input.state)?;
    let city_name = config.text("City", &input.city)?;

    let city = repo
        .find_city(&city_name, &state)
        .await?
        .ok_or(FarmError::UnknownCity {
            name: city_name,
            state,
        })?;

    Ok(ProfileRecord {
        id: user_id,
        first_name,
        last_name,
        id_type: input.id_type,
        id_number,
        phone,
        birth_date,
        city_id: city.id,
        education_level: input.education_level,
        updated_at: Utc::now(),
    })
}

pub struct GetProfileUseCase<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
}

impl<R> GetProfileUseCase<R>
where
    R: ProfileRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId) -> FarmResult<Profile> {
        self.repo
            .find_profile(user_id)
            .await?
            .ok_or(FarmError::ProfileNotFound)
    }
}

/// First-time profile submission; replaces any partial earlier attempt
pub struct CompleteProfileUseCase<R>
where
    R: ProfileRepository + CatalogRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<FarmConfig>,
}

impl<R> CompleteProfileUseCase<R>
where
    R: ProfileRepository + CatalogRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<FarmConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: UserId, input: ProfileInput) -> FarmResult<Profile> {
        let record = build_record(self.repo.as_ref(), &self.config, user_id, input).await?;
        self.repo.upsert_profile(&record).await?;

        tracing::info!(user_id = %user_id, "Producer profile completed");

        self.repo
            .find_profile(&user_id)
            .await?
            .ok_or_else(|| FarmError::Internal("Profile missing after upsert".to_string()))
    }
}

/// Settings page edit of an existing profile
pub struct UpdateProfileUseCase<R>
where
    R: ProfileRepository + CatalogRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    config: Arc<FarmConfig>,
}

impl<R> UpdateProfileUseCase<R>
where
    R: ProfileRepository + CatalogRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, config: Arc<FarmConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, user_id: UserId, input: ProfileInput) -> FarmResult<Profile> {
        if !self.repo.profile_exists(&user_id).await? {
            return Err(FarmError::ProfileNotFound);
        }

        let record = build_record(self.repo.as_ref(), &self.config, user_id, input).await?;
        if !self.repo.update_profile(&record).await? {
            return Err(FarmError::ProfileNotFound);
        }

        tracing::info!(user_id = %user_id, "Producer profile updated");

        self.repo
            .find_profile(&user_id)
            .await?
            .ok_or(FarmError::ProfileNotFound)
    }
}
