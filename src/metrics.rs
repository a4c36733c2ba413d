use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{
    adoption::{self, AdoptionStatus},
    animal, user,
    user::UserStatus,
};

/// Seeds the gauges from current table counts at startup; the service layer
/// keeps them current afterwards.
pub async fn init_metrics(db: &DatabaseConnection) {
    let animal_count = animal::Entity::find().count(db).await.unwrap_or(0);
    metrics::gauge!("shelterd_animals_total").set(animal_count as f64);

    let user_count = user::Entity::find()
        .filter(user::Column::Status.eq(UserStatus::Active))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("shelterd_users_total").set(user_count as f64);

    let pending_adoptions = adoption::Entity::find()
        .filter(adoption::Column::Status.eq(AdoptionStatus::Pending))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("shelterd_adoptions_pending").set(pending_adoptions as f64);

    tracing::info!(
        "initialized metrics: animals={}, users={}, pending_adoptions={}",
        animal_count,
        user_count,
        pending_adoptions
    );
}
