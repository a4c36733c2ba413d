mod common;

use shelterd::error::ApiError;
use shelterd::services::breeds::{self, CreateBreed};
use shelterd::services::species::{self, CreateSpecies, UpdateSpecies};

fn new_species(name: &str) -> CreateSpecies {
    CreateSpecies {
        name: name.to_string(),
        description: None,
    }
}

fn new_breed(name: &str) -> CreateBreed {
    CreateBreed {
        name: name.to_string(),
        description: None,
    }
}

#[tokio::test]
async fn duplicate_species_name_is_a_conflict() {
    let db = common::setup_db().await;

    species::create(&db, new_species("Dog")).await.unwrap();
    let err = species::create(&db, new_species("Dog")).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn renaming_a_species_onto_an_existing_name_is_a_conflict() {
    let db = common::setup_db().await;

    species::create(&db, new_species("Dog")).await.unwrap();
    let cat = species::create(&db, new_species("Cat")).await.unwrap();

    let err = species::update(
        &db,
        cat.id,
        UpdateSpecies {
            name: Some("Dog".to_string()),
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn breed_names_are_unique_per_species_only() {
    let db = common::setup_db().await;
    let dog = species::create(&db, new_species("Dog")).await.unwrap();
    let cat = species::create(&db, new_species("Cat")).await.unwrap();

    breeds::create(&db, dog.id, new_breed("Rex")).await.unwrap();
    let err = breeds::create(&db, dog.id, new_breed("Rex")).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    // Same name under a different species is fine.
    breeds::create(&db, cat.id, new_breed("Rex")).await.unwrap();
}

#[tokio::test]
async fn deleting_a_species_with_breeds_is_a_conflict() {
    let db = common::setup_db().await;
    let dog = species::create(&db, new_species("Dog")).await.unwrap();
    breeds::create(&db, dog.id, new_breed("Labrador")).await.unwrap();

    let err = species::delete(&db, dog.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn deleting_a_breed_with_animals_is_a_conflict() {
    let db = common::setup_db().await;
    let dog = species::create(&db, new_species("Dog")).await.unwrap();
    let lab = breeds::create(&db, dog.id, new_breed("Labrador")).await.unwrap();
    common::seed_animal_of_breed(&db, lab.id, "Rex").await;

    let err = breeds::delete(&db, dog.id, lab.id).await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn breeds_are_scoped_to_their_species() {
    let db = common::setup_db().await;
    let dog = species::create(&db, new_species("Dog")).await.unwrap();
    let cat = species::create(&db, new_species("Cat")).await.unwrap();
    let lab = breeds::create(&db, dog.id, new_breed("Labrador")).await.unwrap();

    let err = breeds::get(&db, cat.id, lab.id).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}
