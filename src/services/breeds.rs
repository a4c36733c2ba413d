use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{now, paginate, Page, PageParams};
use crate::entities::breed;
use crate::error::{is_foreign_key_violation, is_unique_violation, ApiError};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBreed {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBreed {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    species_id: i32,
    params: &PageParams,
) -> Result<Page<breed::Model>, ApiError> {
    super::species::get(db, species_id).await?;
    let query = breed::Entity::find()
        .filter(breed::Column::SpeciesId.eq(species_id))
        .order_by_asc(breed::Column::Name);
    Ok(paginate(db, query, params).await?)
}

pub async fn get(
    db: &DatabaseConnection,
    species_id: i32,
    id: i32,
) -> Result<breed::Model, ApiError> {
    breed::Entity::find_by_id(id)
        .filter(breed::Column::SpeciesId.eq(species_id))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("breed {} not found", id)))
}

pub async fn create(
    db: &DatabaseConnection,
    species_id: i32,
    payload: CreateBreed,
) -> Result<breed::Model, ApiError> {
    payload.validate()?;
    super::species::get(db, species_id).await?;

    let ts = now();
    let new_breed = breed::ActiveModel {
        species_id: Set(species_id),
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    new_breed.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("a breed with that name already exists for this species".to_string())
        } else {
            e.into()
        }
    })
}

pub async fn update(
    db: &DatabaseConnection,
    species_id: i32,
    id: i32,
    payload: UpdateBreed,
) -> Result<breed::Model, ApiError> {
    payload.validate()?;
    let existing = get(db, species_id, id).await?;

    let mut active = existing.into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(now());

    active.update(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("a breed with that name already exists for this species".to_string())
        } else {
            e.into()
        }
    })
}

pub async fn delete(db: &DatabaseConnection, species_id: i32, id: i32) -> Result<(), ApiError> {
    let existing = get(db, species_id, id).await?;
    breed::Entity::delete_by_id(existing.id)
        .exec(db)
        .await
        .map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::Conflict("breed still has animals".to_string())
            } else {
                ApiError::from(e)
            }
        })?;
    Ok(())
}
