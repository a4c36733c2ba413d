#![allow(dead_code)]

use chrono::NaiveDateTime;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;

use shelterd::auth;
use shelterd::entities::animal::{self, AnimalStatus, Sex};
use shelterd::entities::breed;
use shelterd::entities::species;
use shelterd::entities::user::{self, Role, UserStatus};
use shelterd::migrator::Migrator;

pub const TEST_PASSWORD: &str = "password123";

/// One in-memory sqlite database per test. The pool is capped at a single
/// connection because every `sqlite::memory:` connection is its own database.
pub async fn setup_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:".to_owned());
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub fn now() -> NaiveDateTime {
    chrono::Utc::now().naive_utc()
}

pub async fn seed_user(db: &DatabaseConnection, email: &str) -> user::Model {
    let ts = now();
    user::ActiveModel {
        email: Set(email.to_string()),
        password_hash: Set(auth::hash_password(TEST_PASSWORD).unwrap()),
        name: Set("Test".to_string()),
        surname: Set("Keeper".to_string()),
        role: Set(Role::Staff),
        status: Set(UserStatus::Active),
        must_change_password: Set(false),
        reset_token: Set(None),
        reset_token_expires_at: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_species(db: &DatabaseConnection, name: &str) -> species::Model {
    let ts = now();
    species::ActiveModel {
        name: Set(name.to_string()),
        description: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

pub async fn seed_breed(db: &DatabaseConnection, species_id: i32, name: &str) -> breed::Model {
    let ts = now();
    breed::ActiveModel {
        species_id: Set(species_id),
        name: Set(name.to_string()),
        description: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}

/// Species + breed + animal in one call for tests that only need an animal.
pub async fn seed_animal(db: &DatabaseConnection, name: &str) -> animal::Model {
    let species = seed_species(db, &format!("species for {}", name)).await;
    let breed = seed_breed(db, species.id, &format!("breed for {}", name)).await;
    seed_animal_of_breed(db, breed.id, name).await
}

pub async fn seed_animal_of_breed(
    db: &DatabaseConnection,
    breed_id: i32,
    name: &str,
) -> animal::Model {
    let ts = now();
    animal::ActiveModel {
        breed_id: Set(breed_id),
        name: Set(name.to_string()),
        sex: Set(Sex::Female),
        status: Set(AnimalStatus::Sheltered),
        birth_date: Set(None),
        intake_date: Set(ts.date()),
        description: Set(None),
        image_object: Set(None),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap()
}
