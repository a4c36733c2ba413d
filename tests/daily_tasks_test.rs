mod common;

use chrono::Duration;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use shelterd::entities::{daily_task, daily_task_entry};
use shelterd::error::ApiError;
use shelterd::services::daily_tasks::{self, CreateDefaultEntry, CreateEntry, UpdateDefaultEntry};

#[tokio::test]
async fn sheet_for_a_day_without_a_task_is_not_found() {
    let db = common::setup_db().await;
    let animal = common::seed_animal(&db, "Rex").await;

    let err = daily_tasks::get_for_date(&db, animal.id, common::now().date())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn first_entry_of_the_day_creates_the_sheet_seeded_from_defaults() {
    let db = common::setup_db().await;
    let animal = common::seed_animal(&db, "Luna").await;
    let today = common::now().date();

    for title in ["Morning feeding", "Walk"] {
        daily_tasks::create_default_entry(
            &db,
            animal.id,
            CreateDefaultEntry {
                title: title.to_string(),
            },
        )
        .await
        .unwrap();
    }

    daily_tasks::add_entry(
        &db,
        animal.id,
        CreateEntry {
            title: "Vet visit".to_string(),
        },
        today,
    )
    .await
    .unwrap();

    let sheet = daily_tasks::get_for_date(&db, animal.id, today).await.unwrap();
    assert_eq!(sheet.task.date, today);
    let titles: Vec<_> = sheet.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["Morning feeding", "Walk", "Vet visit"]);
    assert!(sheet.entries.iter().all(|e| !e.is_done));
}

#[tokio::test]
async fn completing_an_entry_stamps_the_acting_user() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Max").await;
    let today = common::now().date();

    let entry = daily_tasks::add_entry(
        &db,
        animal.id,
        CreateEntry {
            title: "Evening feeding".to_string(),
        },
        today,
    )
    .await
    .unwrap();

    let completed_at = common::now();
    let done = daily_tasks::complete_entry(&db, user.id, entry.id, today, completed_at)
        .await
        .unwrap();
    assert!(done.is_done);
    assert_eq!(done.completed_at, Some(completed_at));
    assert_eq!(done.completed_by_user_id, Some(user.id));

    let err = daily_tasks::complete_entry(&db, user.id, entry.id, today, common::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

async fn seed_stale_entry(db: &DatabaseConnection, animal_id: i32) -> daily_task_entry::Model {
    let ts = common::now();
    let yesterday = ts.date() - Duration::days(1);
    let task = daily_task::ActiveModel {
        animal_id: Set(animal_id),
        date: Set(yesterday),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    daily_task_entry::ActiveModel {
        daily_task_id: Set(task.id),
        title: Set("Walk".to_string()),
        is_done: Set(false),
        completed_at: Set(None),
        completed_by_user_id: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

#[tokio::test]
async fn entries_of_past_sheets_cannot_be_modified() {
    let db = common::setup_db().await;
    let user = common::seed_user(&db, "keeper@example.com").await;
    let animal = common::seed_animal(&db, "Bella").await;
    let today = common::now().date();

    let entry = seed_stale_entry(&db, animal.id).await;

    let err = daily_tasks::remove_entry(&db, entry.id, today).await.unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let err = daily_tasks::complete_entry(&db, user.id, entry.id, today, common::now())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn default_entries_are_plain_crud() {
    let db = common::setup_db().await;
    let animal = common::seed_animal(&db, "Milo").await;

    let err = daily_tasks::create_default_entry(
        &db,
        999,
        CreateDefaultEntry {
            title: "Walk".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::BadRequest(_)));

    let entry = daily_tasks::create_default_entry(
        &db,
        animal.id,
        CreateDefaultEntry {
            title: "Walk".to_string(),
        },
    )
    .await
    .unwrap();

    let updated = daily_tasks::update_default_entry(
        &db,
        entry.id,
        UpdateDefaultEntry {
            title: "Long walk".to_string(),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "Long walk");

    daily_tasks::delete_default_entry(&db, entry.id).await.unwrap();
    let remaining = daily_tasks::list_default_entries(&db, animal.id).await.unwrap();
    assert!(remaining.is_empty());
}
