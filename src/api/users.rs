use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::services::{users, PageParams};

pub async fn list_users(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = users::list(&db, &params).await?;
    Ok(Json(page))
}

pub async fn get_user(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let found = users::get(&db, id).await?;
    Ok(Json(found))
}

pub async fn me(
    Extension(db): Extension<DatabaseConnection>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse, ApiError> {
    let found = users::get(&db, user.id).await?;
    Ok(Json(found))
}

pub async fn delete_user(
    Extension(db): Extension<DatabaseConnection>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    if user.id == id {
        return Err(ApiError::BadRequest(
            "cannot delete your own account".to_string(),
        ));
    }
    users::soft_delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
