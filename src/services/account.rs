use chrono::Duration;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::now;
use crate::auth::{self, JwtKeys};
use crate::email::Mailer;
use crate::entities::{
    refresh_token,
    user::{self, Role, UserStatus},
};
use crate::error::{is_unique_violation, ApiError};
use crate::services::users::{revoke_all_refresh_tokens, UserDto};

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "not a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub refresh_token: String,
    pub user: UserDto,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "not a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "surname must not be empty"))]
    pub surname: String,
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    pub token: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub new_password: String,
}

async fn issue_token_pair(
    db: &DatabaseConnection,
    keys: &JwtKeys,
    refresh_ttl_days: i64,
    user: user::Model,
) -> Result<TokenPair, ApiError> {
    let access_token = keys.sign(&user)?;
    let ts = now();

    let refresh = refresh_token::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.id),
        token: Set(auth::new_opaque_token()),
        expires_at: Set(ts + Duration::days(refresh_ttl_days)),
        revoked: Set(false),
        revoked_at: Set(None),
        created_at: Set(ts),
    }
    .insert(db)
    .await?;

    Ok(TokenPair {
        access_token,
        token_type: "Bearer",
        expires_in: keys.access_ttl_seconds(),
        refresh_token: refresh.token,
        user: user.into(),
    })
}

pub async fn login(
    db: &DatabaseConnection,
    keys: &JwtKeys,
    refresh_ttl_days: i64,
    payload: LoginRequest,
) -> Result<TokenPair, ApiError> {
    payload.validate()?;

    // Soft-deleted users are excluded from the lookup, so their credentials
    // stop working the moment they are deleted.
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(payload.email.clone()))
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?;

    let user = match user {
        Some(u) if auth::verify_password(&u.password_hash, &payload.password) => u,
        _ => {
            metrics::counter!("shelterd_logins_failed_total").increment(1);
            return Err(ApiError::Unauthorized(
                "invalid email or password".to_string(),
            ));
        }
    };

    metrics::counter!("shelterd_logins_total").increment(1);
    tracing::info!(user_id = user.id, "user logged in");
    issue_token_pair(db, keys, refresh_ttl_days, user).await
}

/// Rotate-on-use: the presented row is revoked and a fresh pair issued.
/// A revoked or expired row is a plain 401; no reuse-detection chain.
pub async fn refresh(
    db: &DatabaseConnection,
    keys: &JwtKeys,
    refresh_ttl_days: i64,
    token: &str,
) -> Result<TokenPair, ApiError> {
    let row = refresh_token::Entity::find()
        .filter(refresh_token::Column::Token.eq(token))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid refresh token".to_string()))?;

    if row.revoked || row.expires_at < now() {
        return Err(ApiError::Unauthorized("invalid refresh token".to_string()));
    }

    let user = user::Entity::find_by_id(row.user_id)
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("invalid refresh token".to_string()))?;

    let mut active = row.into_active_model();
    active.revoked = Set(true);
    active.revoked_at = Set(Some(now()));
    active.update(db).await?;

    issue_token_pair(db, keys, refresh_ttl_days, user).await
}

pub async fn register(
    db: &DatabaseConnection,
    mailer: &Mailer,
    payload: RegisterRequest,
) -> Result<UserDto, ApiError> {
    payload.validate()?;

    let ts = now();
    let new_user = user::ActiveModel {
        email: Set(payload.email),
        password_hash: Set(auth::hash_password(&payload.password)?),
        name: Set(payload.name),
        surname: Set(payload.surname),
        role: Set(payload.role.unwrap_or(Role::Staff)),
        status: Set(UserStatus::Active),
        // New accounts get a provisional password from the admin.
        must_change_password: Set(true),
        reset_token: Set(None),
        reset_token_expires_at: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    let user = new_user.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::Conflict("email already exists".to_string())
        } else {
            ApiError::from(e)
        }
    })?;

    metrics::counter!("shelterd_users_registered_total").increment(1);
    metrics::gauge!("shelterd_users_total").increment(1.0);
    tracing::info!(user_id = user.id, "user registered");

    mailer.send_welcome(&user.email, &user.name).await;
    Ok(user.into())
}

pub async fn change_password(
    db: &DatabaseConnection,
    actor_id: i32,
    payload: ChangePasswordRequest,
) -> Result<(), ApiError> {
    payload.validate()?;

    let user = user::Entity::find_by_id(actor_id)
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("unknown user".to_string()))?;

    if !auth::verify_password(&user.password_hash, &payload.current_password) {
        return Err(ApiError::BadRequest(
            "current password is incorrect".to_string(),
        ));
    }

    let user_id = user.id;
    let mut active = user.into_active_model();
    active.password_hash = Set(auth::hash_password(&payload.new_password)?);
    active.must_change_password = Set(false);
    active.updated_at = Set(now());
    active.update(db).await?;

    // Every outstanding session is cut on a password change.
    revoke_all_refresh_tokens(db, user_id).await?;
    tracing::info!(user_id = user_id, "password changed");
    Ok(())
}

/// Always succeeds from the caller's perspective so the endpoint does not
/// reveal which addresses have accounts.
pub async fn forgot_password(
    db: &DatabaseConnection,
    mailer: &Mailer,
    email: &str,
) -> Result<(), ApiError> {
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?;

    let Some(user) = user else {
        return Ok(());
    };

    let token = auth::new_opaque_token();
    let name = user.name.clone();
    let to = user.email.clone();

    let mut active = user.into_active_model();
    active.reset_token = Set(Some(token.clone()));
    active.reset_token_expires_at = Set(Some(now() + Duration::hours(1)));
    active.updated_at = Set(now());
    active.update(db).await?;

    mailer.send_password_reset(&to, &name, &token).await;
    Ok(())
}

pub async fn reset_password(
    db: &DatabaseConnection,
    payload: ResetPasswordRequest,
) -> Result<(), ApiError> {
    payload.validate()?;

    let user = user::Entity::find()
        .filter(user::Column::ResetToken.eq(payload.token.clone()))
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::BadRequest("invalid or expired reset token".to_string()))?;

    match user.reset_token_expires_at {
        Some(expires_at) if expires_at >= now() => {}
        _ => return Err(ApiError::BadRequest("invalid or expired reset token".to_string())),
    }

    let user_id = user.id;
    let mut active = user.into_active_model();
    active.password_hash = Set(auth::hash_password(&payload.new_password)?);
    active.must_change_password = Set(false);
    active.reset_token = Set(None);
    active.reset_token_expires_at = Set(None);
    active.updated_at = Set(now());
    active.update(db).await?;

    revoke_all_refresh_tokens(db, user_id).await?;
    tracing::info!(user_id = user_id, "password reset via token");
    Ok(())
}

/// Startup bootstrap: seed the first admin account when the table is empty.
pub async fn bootstrap_admin(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<Option<UserDto>, ApiError> {
    use sea_orm::PaginatorTrait;

    if user::Entity::find().count(db).await? > 0 {
        return Ok(None);
    }

    let ts = now();
    let admin = user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(auth::hash_password(password)?),
        name: Set("Admin".to_string()),
        surname: Set("Admin".to_string()),
        role: Set(Role::Admin),
        status: Set(UserStatus::Active),
        must_change_password: Set(true),
        reset_token: Set(None),
        reset_token_expires_at: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::info!(user_id = admin.id, "bootstrapped initial admin user");
    Ok(Some(admin.into()))
}
