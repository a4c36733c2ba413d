use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{now, paginate, Page, PageParams};
use crate::entities::{
    animal, event,
    user::{self, UserStatus},
};
use crate::error::ApiError;

/// Money value object: minor units plus ISO 4217 code.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Money {
    pub cents: i64,
    #[validate(length(equal = 3, message = "currency must be an ISO 4217 code"))]
    pub currency: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEvent {
    pub animal_id: i32,
    pub user_id: i32,
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub starts_at: NaiveDateTime,
    #[validate(nested)]
    pub cost: Option<Money>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEvent {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub starts_at: Option<NaiveDateTime>,
    pub user_id: Option<i32>,
    #[validate(nested)]
    pub cost: Option<Money>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventFilter {
    pub animal_id: Option<i32>,
    pub done: Option<bool>,
    pub title: Option<String>,
}

async fn require_active_user(db: &DatabaseConnection, user_id: i32) -> Result<(), ApiError> {
    let found = user::Entity::find_by_id(user_id)
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?;
    if found.is_none() {
        return Err(ApiError::BadRequest(format!(
            "user {} does not exist",
            user_id
        )));
    }
    Ok(())
}

pub async fn list(
    db: &DatabaseConnection,
    filter: &EventFilter,
    params: &PageParams,
) -> Result<Page<event::Model>, ApiError> {
    let mut query = event::Entity::find().order_by_desc(event::Column::StartsAt);
    if let Some(animal_id) = filter.animal_id {
        query = query.filter(event::Column::AnimalId.eq(animal_id));
    }
    if let Some(done) = filter.done {
        query = query.filter(event::Column::IsDone.eq(done));
    }
    if let Some(title) = &filter.title {
        query = query.filter(event::Column::Title.contains(title));
    }
    Ok(paginate(db, query, params).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<event::Model, ApiError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("event {} not found", id)))
}

pub async fn create(
    db: &DatabaseConnection,
    payload: CreateEvent,
) -> Result<event::Model, ApiError> {
    payload.validate()?;

    if animal::Entity::find_by_id(payload.animal_id)
        .one(db)
        .await?
        .is_none()
    {
        return Err(ApiError::BadRequest(format!(
            "animal {} does not exist",
            payload.animal_id
        )));
    }
    require_active_user(db, payload.user_id).await?;

    let ts = now();
    let (cost_cents, cost_currency) = match payload.cost {
        Some(money) => (Some(money.cents), Some(money.currency)),
        None => (None, None),
    };
    let new_event = event::ActiveModel {
        animal_id: Set(payload.animal_id),
        user_id: Set(payload.user_id),
        title: Set(payload.title),
        description: Set(payload.description),
        starts_at: Set(payload.starts_at),
        is_done: Set(false),
        completed_at: Set(None),
        completed_by_user_id: Set(None),
        cost_cents: Set(cost_cents),
        cost_currency: Set(cost_currency),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    let created = new_event.insert(db).await?;
    tracing::info!(event_id = created.id, animal_id = created.animal_id, "event scheduled");
    Ok(created)
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    payload: UpdateEvent,
) -> Result<event::Model, ApiError> {
    payload.validate()?;
    let existing = get(db, id).await?;
    if existing.is_done {
        return Err(ApiError::BadRequest(
            "event is already completed".to_string(),
        ));
    }
    if let Some(user_id) = payload.user_id {
        require_active_user(db, user_id).await?;
    }

    let mut active = existing.into_active_model();
    if let Some(title) = payload.title {
        active.title = Set(title);
    }
    if let Some(description) = payload.description {
        active.description = Set(Some(description));
    }
    if let Some(starts_at) = payload.starts_at {
        active.starts_at = Set(starts_at);
    }
    if let Some(user_id) = payload.user_id {
        active.user_id = Set(user_id);
    }
    if let Some(money) = payload.cost {
        active.cost_cents = Set(Some(money.cents));
        active.cost_currency = Set(Some(money.currency));
    }
    active.updated_at = Set(now());

    Ok(active.update(db).await?)
}

/// Idempotency guard: a completed event cannot be completed again.
pub async fn end(
    db: &DatabaseConnection,
    actor_id: i32,
    id: i32,
    completed_at: NaiveDateTime,
) -> Result<event::Model, ApiError> {
    let existing = get(db, id).await?;
    if existing.is_done {
        return Err(ApiError::BadRequest(
            "event is already completed".to_string(),
        ));
    }

    let mut active = existing.into_active_model();
    active.is_done = Set(true);
    active.completed_at = Set(Some(completed_at));
    active.completed_by_user_id = Set(Some(actor_id));
    active.updated_at = Set(now());

    let updated = active.update(db).await?;
    tracing::info!(event_id = updated.id, user_id = actor_id, "event completed");
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let res = event::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("event {} not found", id)));
    }
    Ok(())
}
