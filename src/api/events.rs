use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::{events, PageParams};

pub async fn list_events(
    Extension(db): Extension<DatabaseConnection>,
    Query(filter): Query<events::EventFilter>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = events::list(&db, &filter, &params).await?;
    Ok(Json(page))
}

pub async fn get_event(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let found = events::get(&db, id).await?;
    Ok(Json(found))
}

pub async fn create_event(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<events::CreateEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let created = events::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_event(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<events::UpdateEvent>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = events::update(&db, id, payload).await?;
    Ok(Json(updated))
}

pub async fn end_event(
    Extension(db): Extension<DatabaseConnection>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let completed_at = chrono::Utc::now().naive_utc();
    let ended = events::end(&db, user.id, id, completed_at).await?;
    Ok(Json(ended))
}

pub async fn delete_event(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    events::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
