use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

use super::{now, paginate, Page, PageParams};
use crate::entities::{
    refresh_token,
    user::{self, Role, UserStatus},
};
use crate::error::ApiError;

/// What the API exposes about a user; never the entity row itself.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub surname: String,
    pub role: Role,
    pub must_change_password: bool,
    pub created_at: chrono::NaiveDateTime,
}

impl From<user::Model> for UserDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            name: model.name,
            surname: model.surname,
            role: model.role,
            must_change_password: model.must_change_password,
            created_at: model.created_at,
        }
    }
}

pub async fn list(
    db: &DatabaseConnection,
    params: &PageParams,
) -> Result<Page<UserDto>, ApiError> {
    let query = user::Entity::find()
        .filter(user::Column::Status.eq(UserStatus::Active))
        .order_by_asc(user::Column::Id);
    let page = paginate(db, query, params).await?;
    Ok(Page {
        items: page.items.into_iter().map(UserDto::from).collect(),
        total: page.total,
        page: page.page,
        per_page: page.per_page,
        total_pages: page.total_pages,
    })
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<UserDto, ApiError> {
    let found = user::Entity::find_by_id(id)
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))?;
    Ok(found.into())
}

pub(crate) async fn revoke_all_refresh_tokens(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<(), ApiError> {
    let ts = now();
    refresh_token::Entity::update_many()
        .col_expr(refresh_token::Column::Revoked, Expr::value(true))
        .col_expr(refresh_token::Column::RevokedAt, Expr::value(ts))
        .filter(refresh_token::Column::UserId.eq(user_id))
        .filter(refresh_token::Column::Revoked.eq(false))
        .exec(db)
        .await?;
    Ok(())
}

/// Soft delete: the row stays, tagged deleted and excluded from every active
/// query; outstanding refresh tokens are revoked.
pub async fn soft_delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let found = user::Entity::find_by_id(id)
        .filter(user::Column::Status.eq(UserStatus::Active))
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("user {} not found", id)))?;

    let mut active = found.into_active_model();
    active.status = Set(UserStatus::Deleted);
    active.updated_at = Set(now());
    active.update(db).await?;

    revoke_all_refresh_tokens(db, id).await?;
    metrics::gauge!("shelterd_users_total").decrement(1.0);
    tracing::info!(user_id = id, "user soft-deleted");
    Ok(())
}
