mod common;

use shelterd::entities::animal::{AnimalStatus, Sex};
use shelterd::error::ApiError;
use shelterd::services::animals::{self, AnimalFilter, CreateAnimal, UpdateAnimal};
use shelterd::services::PageParams;

#[tokio::test]
async fn create_rejects_unknown_breed() {
    let db = common::setup_db().await;

    let err = animals::create(
        &db,
        CreateAnimal {
            breed_id: 999,
            name: "Rex".to_string(),
            sex: Sex::Male,
            birth_date: None,
            intake_date: None,
            description: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, ApiError::BadRequest(_)));
}

#[tokio::test]
async fn create_then_get_resolves_the_same_animal() {
    let db = common::setup_db().await;
    let species = common::seed_species(&db, "Dog").await;
    let breed = common::seed_breed(&db, species.id, "Labrador").await;

    let created = animals::create(
        &db,
        CreateAnimal {
            breed_id: breed.id,
            name: "Rex".to_string(),
            sex: Sex::Male,
            birth_date: None,
            intake_date: None,
            description: Some("friendly".to_string()),
        },
    )
    .await
    .unwrap();

    let fetched = animals::get(&db, created.id).await.unwrap();
    assert_eq!(fetched.name, "Rex");
    assert_eq!(fetched.status, AnimalStatus::Sheltered);
    // Intake date defaults to the day of registration.
    assert_eq!(fetched.intake_date, common::now().date());
}

#[tokio::test]
async fn list_paginates_and_reports_totals() {
    let db = common::setup_db().await;
    let species = common::seed_species(&db, "Cat").await;
    let breed = common::seed_breed(&db, species.id, "Tabby").await;
    for i in 0..15 {
        common::seed_animal_of_breed(&db, breed.id, &format!("cat-{}", i)).await;
    }

    let page = animals::list(
        &db,
        &AnimalFilter::default(),
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

    let page2 = animals::list(
        &db,
        &AnimalFilter::default(),
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
async fn list_filters_by_status() {
    let db = common::setup_db().await;
    let animal = common::seed_animal(&db, "Luna").await;
    common::seed_animal(&db, "Max").await;

    animals::update(
        &db,
        animal.id,
        UpdateAnimal {
            breed_id: None,
            name: None,
            sex: None,
            status: Some(AnimalStatus::Adopted),
            birth_date: None,
            description: None,
        },
    )
    .await
    .unwrap();

    let adopted = animals::list(
        &db,
        &AnimalFilter {
            status: Some(AnimalStatus::Adopted),
            ..Default::default()
        },
        &PageParams::default(),
    )
    .await
    .unwrap();

    assert_eq!(adopted.total, 1);
    assert_eq!(adopted.items[0].name, "Luna");
}

#[tokio::test]
async fn delete_missing_animal_is_not_found() {
    let db = common::setup_db().await;
    let err = animals::delete(&db, 42).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
