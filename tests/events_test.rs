mod common;

use shelterd::error::ApiError;
use shelterd::services::events::{self, CreateEvent, EventFilter, Money, UpdateEvent};
use shelterd::services::PageParams;

fn checkup(animal_id: i32, user_id: i32) -> CreateEvent {
    CreateEvent {
        animal_id,
        user_id,
        title: "Vet checkup".to_string(),
        description: None,
        starts_at: common::now(),
        cost: Some(Money {
            cents: 4500,
            currency: "EUR".to_string(),
        }),
    }
}

#[tokio::test]
async fn create_rejects_unknown_animal_or_user() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Rex").await;

    let err = events::create(&db, checkup(999, user.id)).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let err = events::create(&db, checkup(animal.id, 999)).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn ending_an_event_stamps_completion() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let closer = common::seed_user(&db, "closer@example.com").await;
    let animal = common::seed_animal(&db, "Luna").await;

    let event = events::create(&db, checkup(animal.id, user.id)).await.unwrap();
    assert!(!event.is_done);

    let completed_at = common::now();
    let ended = events::end(&db, closer.id, event.id, completed_at).await.unwrap();
    assert!(ended.is_done);
    assert_eq!(ended.completed_at, Some(completed_at));
    assert_eq!(ended.completed_by_user_id, Some(closer.id));
}

#[tokio::test]
async fn ending_a_done_event_is_rejected() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Max").await;

    let event = events::create(&db, checkup(animal.id, user.id)).await.unwrap();
    events::end(&db, user.id, event.id, common::now()).await.unwrap();

    let err = events::end(&db, user.id, event.id, common::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn editing_a_done_event_is_rejected() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Bella").await;

    let event = events::create(&db, checkup(animal.id, user.id)).await.unwrap();
    events::end(&db, user.id, event.id, common::now()).await.unwrap();

    let err = events::update(
        &db,
        event.id,
        UpdateEvent {
            title: Some("Follow-up".to_string()),
            description: None,
            starts_at: None,
            user_id: None,
            cost: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn list_paginates_and_filters_by_done() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Milo").await;

    let mut first_id = None;
    for i in 0..15 {
        let event = events::create(
            &db,
            CreateEvent {
                animal_id: animal.id,
                user_id: user.id,
                title: format!("task-{}", i),
                description: None,
                starts_at: common::now(),
                cost: None,
            },
        )
        .await
        .unwrap();
        first_id.get_or_insert(event.id);
    }
    events::end(&db, user.id, first_id.unwrap(), common::now())
        .await
        .unwrap();

    let page = events::list(
        &db,
        &EventFilter::default(),
        &PageParams {
            page: 1,
            per_page: 10,
        },
    )
    .await
    .unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 15);

    let open = events::list(
        &db,
        &EventFilter {
            done: Some(false),
            ..Default::default()
        },
        &PageParams::default(),
    )
    .await
    .unwrap();
    assert_eq!(open.total, 14);
}
