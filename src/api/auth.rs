use std::sync::Arc;

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::DatabaseConnection;
use serde::Deserialize;

use crate::auth::{AuthUser, JwtKeys};
use crate::config::Config;
use crate::email::Mailer;
use crate::error::ApiError;
use crate::services::account;

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn login(
    Extension(db): Extension<DatabaseConnection>,
    Extension(keys): Extension<Arc<JwtKeys>>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<account::LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pair = account::login(&db, &keys, config.refresh_token_ttl_days, payload).await?;
    Ok(Json(pair))
}

pub async fn refresh_token(
    Extension(db): Extension<DatabaseConnection>,
    Extension(keys): Extension<Arc<JwtKeys>>,
    Extension(config): Extension<Arc<Config>>,
    Json(payload): Json<RefreshRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let pair = account::refresh(
        &db,
        &keys,
        config.refresh_token_ttl_days,
        &payload.refresh_token,
    )
    .await?;
    Ok(Json(pair))
}

pub async fn register(
    Extension(db): Extension<DatabaseConnection>,
    Extension(mailer): Extension<Arc<Mailer>>,
    Json(payload): Json<account::RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = account::register(&db, &mailer, payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn change_password(
    Extension(db): Extension<DatabaseConnection>,
    Extension(actor): Extension<AuthUser>,
    Json(payload): Json<account::ChangePasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    account::change_password(&db, actor.id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn forgot_password(
    Extension(db): Extension<DatabaseConnection>,
    Extension(mailer): Extension<Arc<Mailer>>,
    Json(payload): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    account::forgot_password(&db, &mailer, &payload.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn reset_password(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<account::ResetPasswordRequest>,
) -> Result<impl IntoResponse, ApiError> {
    account::reset_password(&db, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}
