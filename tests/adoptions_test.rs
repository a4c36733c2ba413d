mod common;

use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use shelterd::entities::adoption::AdoptionStatus;
use shelterd::entities::animal::AnimalStatus;
use shelterd::entities::event;
use shelterd::error::ApiError;
use shelterd::services::adoptions::{
    self, AdoptionEventPayload, AdoptionFilter, AdoptionPerson, CreateAdoption,
    UpdateAdoptionStatus,
};
use shelterd::services::PageParams;

fn application(animal_id: i32) -> CreateAdoption {
    CreateAdoption {
        animal_id,
        person: AdoptionPerson {
            name: "Jordan Smith".to_string(),
            email: Some("jordan@example.com".to_string()),
            phone: None,
            document: None,
            address: None,
        },
        notes: None,
    }
}

#[tokio::test]
async fn second_application_for_an_animal_with_an_active_one_is_rejected() {
    let db = common::setup_db().await;
    let animal = common::seed_animal(&db, "Rex").await;

    adoptions::create(&db, application(animal.id)).await.unwrap();
    let err = adoptions::create(&db, application(animal.id))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn rejected_application_frees_the_animal_for_a_new_one() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Luna").await;
    let today = common::now().date();

    let first = adoptions::create(&db, application(animal.id)).await.unwrap();
    adoptions::update_status(
        &db,
        user.id,
        first.id,
        UpdateAdoptionStatus {
            status: AdoptionStatus::Rejected,
            adoption_date: None,
            event: None,
        },
        today,
    )
    .await
    .unwrap();

    adoptions::create(&db, application(animal.id)).await.unwrap();
}

#[tokio::test]
async fn status_update_on_non_pending_adoption_is_rejected() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Max").await;
    let today = common::now().date();

    let adoption = adoptions::create(&db, application(animal.id)).await.unwrap();
    adoptions::update_status(
        &db,
        user.id,
        adoption.id,
        UpdateAdoptionStatus {
            status: AdoptionStatus::Approved,
            adoption_date: None,
            event: None,
        },
        today,
    )
    .await
    .unwrap();

    let err = adoptions::update_status(
        &db,
        user.id,
        adoption.id,
        UpdateAdoptionStatus {
            status: AdoptionStatus::Rejected,
            adoption_date: None,
            event: None,
        },
        today,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn approval_with_event_creates_it_and_takes_the_adoption_date() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Bella").await;
    let today = common::now().date();
    let handover = common::now() + chrono::Duration::days(3);

    let adoption = adoptions::create(&db, application(animal.id)).await.unwrap();
    let updated = adoptions::update_status(
        &db,
        user.id,
        adoption.id,
        UpdateAdoptionStatus {
            status: AdoptionStatus::Approved,
            adoption_date: None,
            event: Some(AdoptionEventPayload {
                title: "Handover".to_string(),
                description: None,
                starts_at: handover,
            }),
        },
        today,
    )
    .await
    .unwrap();

    assert_eq!(updated.status, AdoptionStatus::Approved);
    assert_eq!(updated.adoption_date, Some(handover.date()));

    let events = event::Entity::find()
        .filter(event::Column::AnimalId.eq(animal.id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].user_id, user.id);
    assert!(!events[0].is_done);

    let animal = shelterd::services::animals::get(&db, animal.id).await.unwrap();
    assert_eq!(animal.status, AnimalStatus::Adopted);
}

#[tokio::test]
async fn approval_without_event_defaults_the_adoption_date_to_today() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Milo").await;
    let today = common::now().date();

    let adoption = adoptions::create(&db, application(animal.id)).await.unwrap();
    let updated = adoptions::update_status(
        &db,
        user.id,
        adoption.id,
        UpdateAdoptionStatus {
            status: AdoptionStatus::Approved,
            adoption_date: None,
            event: None,
        },
        today,
    )
    .await
    .unwrap();

    assert_eq!(updated.adoption_date, Some(today));
}

#[tokio::test]
async fn list_paginates_with_totals() {
    let db = common::setup_db().await;
    for i in 0..15 {
        let animal = common::seed_animal(&db, &format!("Animal {}", i)).await;
        adoptions::create(&db, application(animal.id)).await.unwrap();
    }

    let page = adoptions::list(
        &db,
        &AdoptionFilter::default(),
        &PageParams {
            page: 1,
            per_page: 10,
        },
    )
    .await
    .unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total, 15);
    assert_eq!(page.total_pages, 2);

    let page2 = adoptions::list(
        &db,
        &AdoptionFilter::default(),
        &PageParams {
            page: 2,
            per_page: 10,
        },
    )
    .await
    .unwrap();
    assert_eq!(page2.items.len(), 5);
}

#[tokio::test]
async fn list_filters_by_status_and_animal_name() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let rex = common::seed_animal(&db, "Rex").await;
    let luna = common::seed_animal(&db, "Luna").await;
    let today = common::now().date();

    let rex_adoption = adoptions::create(&db, application(rex.id)).await.unwrap();
    adoptions::create(&db, application(luna.id)).await.unwrap();
    adoptions::update_status(
        &db,
        user.id,
        rex_adoption.id,
        UpdateAdoptionStatus {
            status: AdoptionStatus::Approved,
            adoption_date: None,
            event: None,
        },
        today,
    )
    .await
    .unwrap();

    let pending = adoptions::list(
        &db,
        &AdoptionFilter {
            status: Some(AdoptionStatus::Pending),
            ..Default::default()
        },
        &PageParams::default(),
    )
    .await
    .unwrap();
    assert_eq!(pending.total, 1);
    assert_eq!(pending.items[0].animal_id, luna.id);

    let by_name = adoptions::list(
        &db,
        &AdoptionFilter {
            animal_name: Some("Rex".to_string()),
            ..Default::default()
        },
        &PageParams::default(),
    )
    .await
    .unwrap();
    assert_eq!(by_name.total, 1);
    assert_eq!(by_name.items[0].animal_id, rex.id);
}
