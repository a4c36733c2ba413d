mod common;

use shelterd::auth::JwtKeys;
use shelterd::email::Mailer;
use shelterd::entities::user::Role;
use shelterd::error::ApiError;
use shelterd::services::account::{
    self, ChangePasswordRequest, LoginRequest, RegisterRequest, ResetPasswordRequest,
};
use shelterd::services::users;

fn keys() -> JwtKeys {
    JwtKeys::new("test-secret", 15)
}

fn mailer() -> Mailer {
    // No SMTP host configured, sends become log lines.
    Mailer::new(None, "http://localhost:3000".to_string()).unwrap()
}

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn login_returns_a_token_pair_for_valid_credentials() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let keys = keys();

    let pair = account::login(
        &db,
        &keys,
        14,
        login_request("keeper@example.com", common::TEST_PASSWORD),
    )
    .await
    .unwrap();

    assert_eq!(pair.user.id, user.id);
    assert_eq!(pair.token_type, "Bearer");
    let claims = keys.verify(&pair.access_token).unwrap();
    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.email, "keeper@example.com");
}

#[tokio::test]
async fn login_rejects_a_wrong_password() {
    let db = common::setup_db().await;
    common::seed_user(&db, "keeper@example.com").await;

    let err = account::login(
        &db,
        &keys(),
        14,
        login_request("keeper@example.com", "not-the-password"),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn soft_deleted_users_cannot_log_in() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;

    users::soft_delete(&db, user.id).await.unwrap();

    let err = account::login(
        &db,
        &keys(),
        14,
        login_request("keeper@example.com", common::TEST_PASSWORD),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn refresh_rotates_the_token_and_revokes_the_old_row() {
    let db = common::setup_db().await;
    common::seed_user(&db, "keeper@example.com").await;
    let keys = keys();

    let pair = account::login(
        &db,
        &keys,
        14,
        login_request("keeper@example.com", common::TEST_PASSWORD),
    )
    .await
    .unwrap();

    let next = account::refresh(&db, &keys, 14, &pair.refresh_token).await.unwrap();
    assert_ne!(next.refresh_token, pair.refresh_token);

    // The presented token was revoked by the rotation.
    let err = account::refresh(&db, &keys, 14, &pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    account::refresh(&db, &keys, 14, &next.refresh_token).await.unwrap();
}

#[tokio::test]
async fn refresh_rejects_an_unknown_token() {
    let db = common::setup_db().await;
    let err = account::refresh(&db, &keys(), 14, "no-such-token")
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn register_rejects_a_duplicate_email() {
    let db = common::setup_db().await;
    let mailer = mailer();

    let request = || RegisterRequest {
        email: "new@example.com".to_string(),
        password: "provisional-pw".to_string(),
        name: "New".to_string(),
        surname: "Keeper".to_string(),
        role: None,
    };

    let created = account::register(&db, &mailer, request()).await.unwrap();
    assert_eq!(created.role, Role::Staff);
    assert!(created.must_change_password);

    let err = account::register(&db, &mailer, request()).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn change_password_cuts_outstanding_sessions() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let keys = keys();

    let pair = account::login(
        &db,
        &keys,
        14,
        login_request("keeper@example.com", common::TEST_PASSWORD),
    )
    .await
    .unwrap();

    account::change_password(
        &db,
        user.id,
        ChangePasswordRequest {
            current_password: common::TEST_PASSWORD.to_string(),
            new_password: "a-brand-new-pw".to_string(),
        },
    )
    .await
    .unwrap();

    let err = account::refresh(&db, &keys, 14, &pair.refresh_token)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));

    account::login(
        &db,
        &keys,
        14,
        login_request("keeper@example.com", "a-brand-new-pw"),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn reset_password_consumes_the_token() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let mailer = mailer();

    account::forgot_password(&db, &mailer, "keeper@example.com")
        .await
        .unwrap();

    use sea_orm::EntityTrait;
    let token = shelterd::entities::user::Entity::find_by_id(user.id)
        .one(&db)
        .await
        .unwrap()
        .unwrap()
        .reset_token
        .unwrap();

    account::reset_password(
        &db,
        ResetPasswordRequest {
            token: token.clone(),
            new_password: "reset-password".to_string(),
        },
    )
    .await
    .unwrap();

    // The token is single use.
    let err = account::reset_password(
        &db,
        ResetPasswordRequest {
            token,
            new_password: "another-password".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    account::login(
        &db,
        &keys(),
        14,
        login_request("keeper@example.com", "reset-password"),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn bootstrap_admin_only_seeds_an_empty_table() {
    let db = common::setup_db().await;

    let admin = account::bootstrap_admin(&db, "admin@example.com", "initial-pw")
        .await
        .unwrap()
        .expect("admin should be created");
    assert_eq!(admin.role, Role::Admin);

    let again = account::bootstrap_admin(&db, "admin@example.com", "initial-pw")
        .await
        .unwrap();
    assert!(again.is_none());
}
