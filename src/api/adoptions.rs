use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::auth::AuthUser;
use crate::config::Config;
use crate::error::ApiError;
use crate::pdf;
use crate::services::{adoptions, animals, configuration, PageParams};

pub async fn list_adoptions(
    Extension(db): Extension<DatabaseConnection>,
    Query(filter): Query<adoptions::AdoptionFilter>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = adoptions::list(&db, &filter, &params).await?;
    Ok(Json(page))
}

pub async fn get_adoption(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let found = adoptions::get(&db, id).await?;
    Ok(Json(found))
}

pub async fn create_adoption(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<adoptions::CreateAdoption>,
) -> Result<impl IntoResponse, ApiError> {
    let created = adoptions::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_adoption_status(
    Extension(db): Extension<DatabaseConnection>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<i32>,
    Json(payload): Json<adoptions::UpdateAdoptionStatus>,
) -> Result<impl IntoResponse, ApiError> {
    let today = chrono::Utc::now().date_naive();
    let updated = adoptions::update_status(&db, user.id, id, payload, today).await?;
    Ok(Json(updated))
}

pub async fn delete_adoption(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    adoptions::delete(&db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Renders the adoption agreement for a single adoption as a PDF
/// document, stamped with the shelter letterhead.
pub async fn adoption_agreement(
    Extension(db): Extension<DatabaseConnection>,
    Extension(config): Extension<Arc<Config>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let adoption = adoptions::get(&db, id).await?;
    let animal = animals::get(&db, adoption.animal_id).await?;
    let shelter = configuration::get(&db).await?;

    let font_dir = config.font_dir.clone();
    let bytes = tokio::task::spawn_blocking(move || {
        pdf::adoption_agreement(&font_dir, &shelter, &adoption, &animal)
    })
    .await
    .map_err(|e| ApiError::Internal(e.into()))??;

    metrics::counter!("shelterd_agreements_rendered_total").increment(1);

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"adoption-{}.pdf\"", id),
            ),
        ],
        bytes,
    ))
}
