use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{now, paginate, Page, PageParams};
use crate::entities::species;
use crate::error::{is_foreign_key_violation, is_unique_violation, ApiError};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSpecies {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateSpecies {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    params: &PageParams,
) -> Result<Page<species::Model>, ApiError> {
    let query = species::Entity::find().order_by_asc(species::Column::Name);
    Ok(paginate(db, query, params).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<species::Model, ApiError> {
    species::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("species {} not found", id)))
}

pub async fn create(
    db: &DatabaseConnection,
    payload: CreateSpecies,
) -> Result<species::Model, ApiError> {
    payload.validate()?;
    let ts = now();
    let new_species = species::ActiveModel {
        name: Set(payload.name),
        description: Set(payload.description),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    // The unique index on name is the authority; no pre-check query.
    new_species.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("a species with that name already exists".to_string())
        } else {
            e.into()
        }
    })
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: UpdateSpecies,
) -> Result<species::Model, ApiError> {
    payload.validate()?;
    let existing = get(db, id).await?;

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
            ApiError::Conflict("a species with that name already exists".to_string())
        } else {
            e.into()
        }
    })
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let res = species::Entity::delete_by_id(id).exec(db).await.map_err(|e| {
        if is_foreign_key_violation(&e) {
            ApiError::Conflict("species still has breeds".to_string())
        } else {
            ApiError::from(e)
        }
    })?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("species {} not found", id)));
    }
    Ok(())
}
