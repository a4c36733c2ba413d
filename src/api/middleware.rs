use std::sync::Arc;

use axum::{
    extract::{Extension, Request},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{AuthUser, JwtKeys};
use crate::error::ApiError;

/// Decodes the Bearer token and makes the acting user available to handlers
/// as an `AuthUser` extension.
pub async fn auth_middleware(
    Extension(keys): Extension<Arc<JwtKeys>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ApiError::Unauthorized("missing bearer token".to_string()).into_response();
    };

    match keys.verify(token) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthUser {
                id: claims.sub,
                role: claims.role,
                must_change_password: claims.must_change_password,
            });
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

/// Route-group guard for admin-only endpoints; runs after `auth_middleware`.
pub async fn require_admin(request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.is_admin() => next.run(request).await,
        Some(_) => ApiError::Forbidden.into_response(),
        None => ApiError::Unauthorized("missing bearer token".to_string()).into_response(),
    }
}
