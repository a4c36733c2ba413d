use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::daily_tasks;

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

#[derive(Debug, Deserialize)]
pub struct DateQuery {
    pub date: NaiveDate,
}

/// Fetches the task sheet for one animal and one calendar day. Past
/// sheets stay addressable, they just cannot be modified anymore.
pub async fn get_daily_task(
    Extension(db): Extension<DatabaseConnection>,
    Path(animal_id): Path<i32>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let sheet = daily_tasks::get_for_date(&db, animal_id, query.date).await?;
    Ok(Json(sheet))
}

pub async fn add_entry(
    Extension(db): Extension<DatabaseConnection>,
    Path(animal_id): Path<i32>,
    Json(payload): Json<daily_tasks::CreateEntry>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = daily_tasks::add_entry(&db, animal_id, payload, today()).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_entry(
    Extension(db): Extension<DatabaseConnection>,
    Path(entry_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    daily_tasks::remove_entry(&db, entry_id, today()).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_entry(
    Extension(db): Extension<DatabaseConnection>,
    Extension(user): Extension<AuthUser>,
    Path(entry_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let completed_at = chrono::Utc::now().naive_utc();
    let entry =
        daily_tasks::complete_entry(&db, user.id, entry_id, today(), completed_at).await?;
    Ok(Json(entry))
}

pub async fn list_default_entries(
    Extension(db): Extension<DatabaseConnection>,
    Path(animal_id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let entries = daily_tasks::list_default_entries(&db, animal_id).await?;
    Ok(Json(entries))
}

pub async fn create_default_entry(
    Extension(db): Extension<DatabaseConnection>,
    Path(animal_id): Path<i32>,
    Json(payload): Json<daily_tasks::CreateDefaultEntry>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = daily_tasks::create_default_entry(&db, animal_id, payload).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn update_default_entry(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<daily_tasks::UpdateDefaultEntry>,
) -> Result<impl IntoResponse, ApiError> {
    let entry = daily_tasks::update_default_entry(&db, id, payload).await?;
    Ok(Json(entry))
}

pub async fn delete_default_entry(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    daily_tasks::delete_default_entry(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
