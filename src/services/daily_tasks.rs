use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::now;
use crate::entities::{animal, daily_task, daily_task_default_entry, daily_task_entry};
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct DailyTaskWithEntries {
    #[serde(flatten)]
    pub task: daily_task::Model,
    pub entries: Vec<daily_task_entry::Model>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntry {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDefaultEntry {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDefaultEntry {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
}

async fn require_animal(db: &DatabaseConnection, animal_id: i32) -> Result<(), ApiError> {
    if animal::Entity::find_by_id(animal_id).one(db).await?.is_none() {
        return Err(ApiError::BadRequest(format!(
            "animal {} does not exist",
            animal_id
        )));
    }
    Ok(())
}

/// The task sheet for one exact calendar date; 404 when no sheet exists.
pub async fn get_for_date(
    db: &DatabaseConnection,
    animal_id: i32,
    date: NaiveDate,
) -> Result<DailyTaskWithEntries, ApiError> {
    let task = daily_task::Entity::find()
        .filter(daily_task::Column::AnimalId.eq(animal_id))
        .filter(daily_task::Column::Date.eq(date))
        .one(db)
        .await?
        .ok_or_else(|| {
            ApiError::NotFound(format!("no daily task for animal {} on {}", animal_id, date))
        })?;

    let entries = daily_task_entry::Entity::find()
        .filter(daily_task_entry::Column::DailyTaskId.eq(task.id))
        .order_by_asc(daily_task_entry::Column::Id)
        .all(db)
        .await?;

    Ok(DailyTaskWithEntries { task, entries })
}

/// Find-or-create today's sheet. A freshly created sheet is seeded from the
/// animal's default entries.
async fn find_or_create_task(
    db: &DatabaseConnection,
    animal_id: i32,
    today: NaiveDate,
) -> Result<daily_task::Model, ApiError> {
    require_animal(db, animal_id).await?;

    if let Some(task) = daily_task::Entity::find()
        .filter(daily_task::Column::AnimalId.eq(animal_id))
        .filter(daily_task::Column::Date.eq(today))
        .one(db)
        .await?
    {
        return Ok(task);
    }

    let ts = now();
    let task = daily_task::ActiveModel {
        animal_id: Set(animal_id),
        date: Set(today),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let defaults = daily_task_default_entry::Entity::find()
        .filter(daily_task_default_entry::Column::AnimalId.eq(animal_id))
        .order_by_asc(daily_task_default_entry::Column::Id)
        .all(db)
        .await?;
    for default in defaults {
        daily_task_entry::ActiveModel {
            daily_task_id: Set(task.id),
            title: Set(default.title),
            is_done: Set(false),
            completed_at: Set(None),
            completed_by_user_id: Set(None),
            created_at: Set(ts),
            updated_at: Set(ts),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    Ok(task)
}

pub async fn add_entry(
    db: &DatabaseConnection,
    animal_id: i32,
    payload: CreateEntry,
    today: NaiveDate,
) -> Result<daily_task_entry::Model, ApiError> {
    payload.validate()?;
    let task = find_or_create_task(db, animal_id, today).await?;

    let ts = now();
    let entry = daily_task_entry::ActiveModel {
        daily_task_id: Set(task.id),
        title: Set(payload.title),
        is_done: Set(false),
        completed_at: Set(None),
        completed_by_user_id: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(entry)
}

async fn entry_with_task(
    db: &DatabaseConnection,
    entry_id: i32,
) -> Result<(daily_task_entry::Model, daily_task::Model), ApiError> {
    let entry = daily_task_entry::Entity::find_by_id(entry_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("daily task entry {} not found", entry_id)))?;
    let task = daily_task::Entity::find_by_id(entry.daily_task_id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("parent daily task not found".to_string()))?;
    Ok((entry, task))
}

/// Entries are only mutable on the calendar day of their sheet.
pub async fn remove_entry(
    db: &DatabaseConnection,
    entry_id: i32,
    today: NaiveDate,
) -> Result<(), ApiError> {
    let (entry, task) = entry_with_task(db, entry_id).await?;
    if task.date != today {
        return Err(ApiError::BadRequest(
            "entry belongs to a different day".to_string(),
        ));
    }
    daily_task_entry::Entity::delete_by_id(entry.id).exec(db).await?;
    Ok(())
}

pub async fn complete_entry(
    db: &DatabaseConnection,
    actor_id: i32,
    entry_id: i32,
    today: NaiveDate,
    completed_at: NaiveDateTime,
) -> Result<daily_task_entry::Model, ApiError> {
    let (entry, task) = entry_with_task(db, entry_id).await?;
    if task.date != today {
        return Err(ApiError::BadRequest(
            "entry belongs to a different day".to_string(),
        ));
    }
    if entry.is_done {
        return Err(ApiError::BadRequest(
            "entry is already completed".to_string(),
        ));
    }

    let mut active = entry.into_active_model();
    active.is_done = Set(true);
    active.completed_at = Set(Some(completed_at));
    active.completed_by_user_id = Set(Some(actor_id));
    active.updated_at = Set(now());
    Ok(active.update(db).await?)
}

pub async fn list_default_entries(
    db: &DatabaseConnection,
    animal_id: i32,
) -> Result<Vec<daily_task_default_entry::Model>, ApiError> {
    require_animal(db, animal_id).await?;
    Ok(daily_task_default_entry::Entity::find()
        .filter(daily_task_default_entry::Column::AnimalId.eq(animal_id))
        .order_by_asc(daily_task_default_entry::Column::Id)
        .all(db)
        .await?)
}

pub async fn create_default_entry(
    db: &DatabaseConnection,
    animal_id: i32,
    payload: CreateDefaultEntry,
) -> Result<daily_task_default_entry::Model, ApiError> {
    payload.validate()?;
    require_animal(db, animal_id).await?;

    let ts = now();
    Ok(daily_task_default_entry::ActiveModel {
        animal_id: Set(animal_id),
        title: Set(payload.title),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?)
}

pub async fn update_default_entry(
    db: &DatabaseConnection,
    id: i32,
    payload: UpdateDefaultEntry,
) -> Result<daily_task_default_entry::Model, ApiError> {
    payload.validate()?;
    let existing = daily_task_default_entry::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("default entry {} not found", id)))?;

    let mut active = existing.into_active_model();
    active.title = Set(payload.title);
    active.updated_at = Set(now());
    Ok(active.update(db).await?)
}

pub async fn delete_default_entry(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let res = daily_task_default_entry::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("default entry {} not found", id)));
    }
    Ok(())
}
