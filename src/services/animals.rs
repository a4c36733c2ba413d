use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use validator::Validate;

use super::{now, paginate, Page, PageParams};
use crate::entities::{
    animal::{self, AnimalStatus, Sex},
    breed,
};
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct AnimalFilter {
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub status: Option<AnimalStatus>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAnimal {
    pub breed_id: i32,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub sex: Sex,
    pub birth_date: Option<NaiveDate>,
    pub intake_date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAnimal {
    pub breed_id: Option<i32>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    pub sex: Option<Sex>,
    pub status: Option<AnimalStatus>,
    pub birth_date: Option<NaiveDate>,
    pub description: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    filter: &AnimalFilter,
    params: &PageParams,
) -> Result<Page<animal::Model>, ApiError> {
    let mut query = animal::Entity::find().order_by_asc(animal::Column::Id);
    if let Some(name) = &filter.name {
        query = query.filter(animal::Column::Name.contains(name));
    }
    if let Some(sex) = filter.sex {
        query = query.filter(animal::Column::Sex.eq(sex));
    }
    if let Some(status) = filter.status {
        query = query.filter(animal::Column::Status.eq(status));
    }
    Ok(paginate(db, query, params).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<animal::Model, ApiError> {
    animal::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("animal {} not found", id)))
}

pub async fn create(
    db: &DatabaseConnection,
    payload: CreateAnimal,
) -> Result<animal::Model, ApiError> {
    payload.validate()?;

    let breed_exists = breed::Entity::find_by_id(payload.breed_id).one(db).await?;
    if breed_exists.is_none() {
        return Err(ApiError::BadRequest(format!(
            "breed {} does not exist",
            payload.breed_id
        )));
    }

    let ts = now();
    let new_animal = animal::ActiveModel {
        breed_id: Set(payload.breed_id),
        name: Set(payload.name),
        sex: Set(payload.sex),
        status: Set(AnimalStatus::Sheltered),
        birth_date: Set(payload.birth_date),
        intake_date: Set(payload.intake_date.unwrap_or_else(|| ts.date())),
        description: Set(payload.description),
        image_object: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    let animal = new_animal.insert(db).await?;
    metrics::gauge!("shelterd_animals_total").increment(1.0);
    tracing::info!(animal_id = animal.id, "registered animal");
    Ok(animal)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: UpdateAnimal,
) -> Result<animal::Model, ApiError> {
    payload.validate()?;
    let animal = get(db, id).await?;

    if let Some(breed_id) = payload.breed_id {
        if breed::Entity::find_by_id(breed_id).one(db).await?.is_none() {
            return Err(ApiError::BadRequest(format!(
                "breed {} does not exist",
                breed_id
            )));
        }
    }

    let mut active = animal.into_active_model();
    if let Some(breed_id) = payload.breed_id {
        active.breed_id = Set(breed_id);
    }
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(sex) = payload.sex {
        active.sex = Set(sex);
    }
    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(birth_date) = payload.birth_date {
        active.birth_date = Set(Some(birth_date));
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    active.updated_at = Set(now());

    Ok(active.update(db).await?)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let res = animal::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("animal {} not found", id)));
    }
    metrics::gauge!("shelterd_animals_total").decrement(1.0);
    Ok(())
}

/// Records the blob-storage object key of the uploaded profile image.
pub async fn set_image(
    db: &DatabaseConnection,
    id: i32,
    object_key: String,
) -> Result<animal::Model, ApiError> {
    let animal = get(db, id).await?;
    let mut active = animal.into_active_model();
    active.image_object = Set(Some(object_key));
    active.updated_at = Set(now());
    Ok(active.update(db).await?)
}
