use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Multipart, Path, Query},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use sea_orm::DatabaseConnection;

use crate::error::ApiError;
use crate::services::{animals, PageParams};
use crate::storage::BlobStore;

pub async fn list_animals(
    Extension(db): Extension<DatabaseConnection>,
    Query(params): Query<PageParams>,
    Query(filter): Query<animals::AnimalFilter>,
) -> Result<impl IntoResponse, ApiError> {
    let page = animals::list(&db, &filter, &params).await?;
    Ok(Json(page))
}

pub async fn get_animal(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = animals::get(&db, id).await?;
    Ok(Json(animal))
}

pub async fn create_animal(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<animals::CreateAnimal>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = animals::create(&db, payload).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

pub async fn update_animal(
    Extension(db): Extension<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<animals::UpdateAnimal>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = animals::update(&db, id, payload).await?;
    Ok(Json(animal))
}

pub async fn delete_animal(
    Extension(db): Extension<DatabaseConnection>,
    store: Option<Extension<Arc<BlobStore>>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = animals::get(&db, id).await?;
    animals::delete(&db, id).await?;

    // Best effort; the row is already gone, so a bucket hiccup only logs.
    if let Some(Extension(store)) = store {
        if let Some(key) = &animal.image_object {
            if let Err(e) = store.delete(key).await {
                tracing::warn!(key = key.as_str(), "failed to delete animal image: {}", e);
            }
        }
        match store.list(&format!("animal-attachments/{}/", id)).await {
            Ok(files) => {
                for file_name in files {
                    let key = BlobStore::object_key("animal-attachments", id, &file_name);
                    if let Err(e) = store.delete(&key).await {
                        tracing::warn!(key = key.as_str(), "failed to delete attachment: {}", e);
                    }
                }
            }
            Err(e) => tracing::warn!(animal_id = id, "failed to list attachments: {}", e),
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Pulls the first file field out of a multipart body.
async fn read_upload(mut multipart: Multipart) -> Result<(String, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        if field.file_name().is_none() {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        return Ok((file_name, data.to_vec()));
    }
    Err(ApiError::BadRequest("no file field found".to_string()))
}

pub async fn upload_image(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<BlobStore>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    animals::get(&db, id).await?;
    let (file_name, data) = read_upload(multipart).await?;

    let content_type = mime_guess::from_path(&file_name)
        .first_or_octet_stream()
        .to_string();
    if !content_type.starts_with("image/") {
        return Err(ApiError::BadRequest("file is not an image".to_string()));
    }

    let key = BlobStore::object_key("animal-images", id, &file_name);
    store.put(&key, data, &content_type).await?;
    let animal = animals::set_image(&db, id, key).await?;
    Ok((StatusCode::CREATED, Json(animal)))
}

pub async fn get_image(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<BlobStore>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    let animal = animals::get(&db, id).await?;
    let key = animal
        .image_object
        .ok_or_else(|| ApiError::NotFound(format!("animal {} has no image", id)))?;

    let data = store.get(&key).await?;
    let content_type = mime_guess::from_path(&key)
        .first_or_octet_stream()
        .to_string();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "public, max-age=3600".to_string()),
        ],
        Body::from(data),
    ))
}

pub async fn upload_attachment(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<BlobStore>>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    animals::get(&db, id).await?;
    let (file_name, data) = read_upload(multipart).await?;

    let content_type = mime_guess::from_path(&file_name)
        .first_or_octet_stream()
        .to_string();
    let key = BlobStore::object_key("animal-attachments", id, &file_name);
    store.put(&key, data, &content_type).await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "filename": file_name })),
    ))
}

pub async fn list_attachments(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<BlobStore>>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ApiError> {
    animals::get(&db, id).await?;
    let prefix = format!("animal-attachments/{}/", id);
    let files = store.list(&prefix).await?;
    Ok(Json(files))
}

pub async fn download_attachment(
    Extension(db): Extension<DatabaseConnection>,
    Extension(store): Extension<Arc<BlobStore>>,
    Path((id, filename)): Path<(i32, String)>,
) -> Result<impl IntoResponse, ApiError> {
    animals::get(&db, id).await?;
    // Reject path traversal in the user-supplied segment.
    if filename.contains('/') || filename.contains("..") {
        return Err(ApiError::BadRequest("invalid filename".to_string()));
    }

    let key = BlobStore::object_key("animal-attachments", id, &filename);
    let data = store.get(&key).await?;
    let content_type = mime_guess::from_path(&filename)
        .first_or_octet_stream()
        .to_string();
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type)],
        Body::from(data),
    ))
}
