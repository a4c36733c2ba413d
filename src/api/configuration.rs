use axum::{extract::Extension, response::IntoResponse, Json};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::services::configuration;

pub async fn get_configuration(
    Extension(db): Extension<DatabaseConnection>,
) -> Result<impl IntoResponse, ApiError> {
    let config = configuration::get(&db).await?;
    Ok(Json(config))
}

pub async fn update_configuration(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<configuration::UpdateConfiguration>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = configuration::update(&db, payload).await?;
    Ok(Json(updated))
}
