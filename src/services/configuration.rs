use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use serde::Deserialize;
use validator::Validate;

use super::now;
use crate::entities::shelter_configuration;
use crate::error::ApiError;

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateConfiguration {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "not a valid email address"))]
    pub email: Option<String>,
}

/// The single configuration row, created lazily with a placeholder name.
pub async fn get(db: &DatabaseConnection) -> Result<shelter_configuration::Model, ApiError> {
    if let Some(existing) = shelter_configuration::Entity::find().one(db).await? {
        return Ok(existing);
    }

    let ts = now();
    Ok(shelter_configuration::ActiveModel {
        name: Set("Animal Shelter".to_string()),
        address: Set(None),
        phone: Set(None),
        email: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

pub async fn update(
    db: &DatabaseConnection,
    payload: UpdateConfiguration,
) -> Result<shelter_configuration::Model, ApiError> {
    payload.validate()?;
    let existing = get(db).await?;

    let mut active = existing.into_active_model();
    active.name = Set(payload.name);
    active.address = Set(payload.address);
    active.phone = Set(payload.phone);
    active.email = Set(payload.email);
    active.updated_at = Set(now());
    Ok(active.update(db).await?)
}
