mod common;

use shelterd::error::ApiError;
use shelterd::services::configuration::{self, UpdateConfiguration};
use shelterd::services::users;
use shelterd::services::PageParams;

#[tokio::test]
async fn list_paginates_active_users() {
    let db = common::setup_db().await;
    for i in 0..15 {
        common::seed_user(&db, &format!("keeper-{}@example.com", i)).await;
    }

    let page = users::list(
        &db,
        &PageParams {
            page: 1,
            per_page: 10,
        },
    )
    .await
    .unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 15);
}

#[tokio::test]
async fn soft_deleted_users_disappear_from_reads() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    common::seed_user(&db, "other@example.com").await;

    users::soft_delete(&db, user.id).await.unwrap();

    let err = users::get(&db, user.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));

    let page = users::list(&db, &PageParams::default()).await.unwrap();
    assert_eq!(page.total, 1);

    // Deleting twice is a plain 404, the row is already gone from the
    // active set.
    let err = users::soft_delete(&db, user.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn configuration_row_is_created_lazily_and_updated_in_place() {
    let db = common::setup_db().await;

    let initial = configuration::get(&db).await.unwrap();
    assert_eq!(initial.name, "Animal Shelter");

    let updated = configuration::update(
        &db,
        UpdateConfiguration {
            name: "Sunny Paws".to_string(),
            address: Some("1 Shelter Lane".to_string()),
            phone: None,
            email: Some("hello@sunnypaws.org".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.id, initial.id);
    assert_eq!(updated.name, "Sunny Paws");

    let fetched = configuration::get(&db).await.unwrap();
    assert_eq!(fetched.name, "Sunny Paws");
}
