use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::services::{breeds, species, PageParams};

pub async fn list_species(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = species::list(&db, &params).await?;
    Ok(Json(page))
}

pub async fn get_species(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let found = species::get(&db, id).await?;
    Ok(Json(found))
}

pub async fn create_species(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<species::CreateSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    let created = species::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_species(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<species::UpdateSpecies>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = species::update(&db, id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_species(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    species::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_breeds(
    Extension(db): Extension<DatabaseConnection>,
    Path(species_id): Path<i32>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = breeds::list(&db, species_id, &params).await?;
    Ok(Json(page))
}

pub async fn get_breed(
    Extension(db): Extension<DatabaseConnection>,
    Path((species_id, id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    let found = breeds::get(&db, species_id, id).await?;
    Ok(Json(found))
}

pub async fn create_breed(
    Extension(db): Extension<DatabaseConnection>,
    Path(species_id): Path<i32>,
    Json(payload): Json<breeds::CreateBreed>,
) -> Result<impl IntoResponse, ApiError> {
    let created = breeds::create(&db, species_id, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_breed(
    Extension(db): Extension<DatabaseConnection>,
    Path((species_id, id)): Path<(i32, i32)>,
    Json(payload): Json<breeds::UpdateBreed>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = breeds::update(&db, species_id, id, payload).await?;
    Ok(Json(updated))
}

pub async fn delete_breed(
    Extension(db): Extension<DatabaseConnection>,
    Path((species_id, id)): Path<(i32, i32)>,
) -> Result<impl IntoResponse, ApiError> {
    breeds::delete(&db, species_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
