use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{now, paginate, Page, PageParams};
use crate::entities::{
    adoption::{self, AdoptionStatus},
    animal::{self, AnimalStatus},
    event,
};
use crate::error::{is_unique_violation, ApiError};

/// AdoptionPerson value object; persisted as flattened columns.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdoptionPerson {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(email(message = "not a valid email address"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdoption {
    pub animal_id: i32,
    #[validate(nested)]
    pub person: AdoptionPerson,
    pub notes: Option<String>,
}

/// Optional inline event accompanying an approval (e.g. the handover
/// appointment); the adoption date is deferred to its planned date.
#[derive(Debug, Deserialize, Validate)]
pub struct AdoptionEventPayload {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    pub description: Option<String>,
    pub starts_at: chrono::NaiveDateTime,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAdoptionStatus {
    pub status: AdoptionStatus,
    pub adoption_date: Option<NaiveDate>,
    #[validate(nested)]
    pub event: Option<AdoptionEventPayload>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AdoptionFilter {
    pub status: Option<AdoptionStatus>,
    pub animal_id: Option<i32>,
    pub animal_name: Option<String>,
}

pub async fn list(
    db: &DatabaseConnection,
    filter: &AdoptionFilter,
    params: &PageParams,
) -> Result<Page<adoption::Model>, ApiError> {
    let mut query = adoption::Entity::find().order_by_desc(adoption::Column::CreatedAt);
    if let Some(status) = filter.status {
        query = query.filter(adoption::Column::Status.eq(status));
    }
    if let Some(animal_id) = filter.animal_id {
        query = query.filter(adoption::Column::AnimalId.eq(animal_id));
    }
    if let Some(animal_name) = &filter.animal_name {
        query = query
            .join(JoinType::InnerJoin, adoption::Relation::Animal.def())
            .filter(animal::Column::Name.contains(animal_name));
    }
    Ok(paginate(db, query, params).await?)
}

pub async fn get(db: &DatabaseConnection, id: i32) -> Result<adoption::Model, ApiError> {
    adoption::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("adoption {} not found", id)))
}

pub async fn create(
    db: &DatabaseConnection,
    payload: CreateAdoption,
) -> Result<adoption::Model, ApiError> {
    payload.validate()?;

    let animal = animal::Entity::find_by_id(payload.animal_id).one(db).await?;
    if animal.is_none() {
        return Err(ApiError::BadRequest(format!(
            "animal {} does not exist",
            payload.animal_id
        )));
    }

    // Friendly pre-check; the partial unique index on (animal_id) for
    // non-terminal statuses remains the authority under concurrent requests.
    let active_exists = adoption::Entity::find()
        .filter(adoption::Column::AnimalId.eq(payload.animal_id))
        .filter(
            Condition::any()
                .add(adoption::Column::Status.eq(AdoptionStatus::Pending))
                .add(adoption::Column::Status.eq(AdoptionStatus::Approved)),
        )
        .one(db)
        .await?;
    if active_exists.is_some() {
        return Err(ApiError::BadRequest(
            "animal already has a pending or approved adoption".to_string(),
        ));
    }

    let ts = now();
    let new_adoption = adoption::ActiveModel {
        animal_id: Set(payload.animal_id),
        status: Set(AdoptionStatus::Pending),
        adoption_date: Set(None),
        person_name: Set(payload.person.name),
        person_email: Set(payload.person.email),
        person_phone: Set(payload.person.phone),
        person_document: Set(payload.person.document),
        person_address: Set(payload.person.address),
        notes: Set(payload.notes),
        created_at: Set(ts),
        updated_at: Set(ts),
        ..Default::default()
    };

    let adoption = new_adoption.insert(db).await.map_err(|e| {
        if is_unique_violation(&e) {
            ApiError::BadRequest("animal already has a pending or approved adoption".to_string())
        } else {
            ApiError::from(e)
        }
    })?;

    metrics::counter!("shelterd_adoptions_created_total").increment(1);
    metrics::gauge!("shelterd_adoptions_pending").increment(1.0);
    tracing::info!(
        adoption_id = adoption.id,
        animal_id = adoption.animal_id,
        "adoption application registered"
    );
    Ok(adoption)
}

/// The only transition point of the adoption state machine. Approving with an
/// inline event payload is the one cross-entity write in the system: the event
/// insert and the adoption update commit together or not at all.
pub async fn update_status(
    db: &DatabaseConnection,
    actor_id: i32,
    id: i32,
    payload: UpdateAdoptionStatus,
    today: NaiveDate,
) -> Result<adoption::Model, ApiError> {
    payload.validate()?;

    let adoption = get(db, id).await?;
    if adoption.status != AdoptionStatus::Pending {
        return Err(ApiError::BadRequest(
            "adoption is no longer pending".to_string(),
        ));
    }
    if payload.status == AdoptionStatus::Pending {
        return Err(ApiError::BadRequest(
            "status must be approved or rejected".to_string(),
        ));
    }

    let ts = now();
    let txn = db.begin().await?;

    let adoption_date = match (&payload.status, &payload.event) {
        (AdoptionStatus::Approved, Some(ev)) => {
            let new_event = event::ActiveModel {
                animal_id: Set(adoption.animal_id),
                user_id: Set(actor_id),
                title: Set(ev.title.clone()),
                description: Set(ev.description.clone()),
                starts_at: Set(ev.starts_at),
                is_done: Set(false),
                completed_at: Set(None),
                completed_by_user_id: Set(None),
                cost_cents: Set(None),
                cost_currency: Set(None),
                created_at: Set(ts),
                updated_at: Set(ts),
                ..Default::default()
            };
            let created = new_event.insert(&txn).await?;
            Some(created.starts_at.date())
        }
        (AdoptionStatus::Approved, None) => Some(payload.adoption_date.unwrap_or(today)),
        _ => None,
    };

    let animal_id = adoption.animal_id;
    let mut active = adoption.into_active_model();
    active.status = Set(payload.status);
    active.adoption_date = Set(adoption_date);
    active.updated_at = Set(ts);
    let updated = active.update(&txn).await?;

    if payload.status == AdoptionStatus::Approved {
        if let Some(animal) = animal::Entity::find_by_id(animal_id).one(&txn).await? {
            let mut animal_active = animal.into_active_model();
            animal_active.status = Set(AnimalStatus::Adopted);
            animal_active.updated_at = Set(ts);
            animal_active.update(&txn).await?;
        }
    }

    txn.commit().await?;

    // The guard above only lets pending adoptions through here.
    metrics::gauge!("shelterd_adoptions_pending").decrement(1.0);
    tracing::info!(
        adoption_id = updated.id,
        status = ?updated.status,
        "adoption status updated"
    );
    Ok(updated)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<(), ApiError> {
    let adoption = get(db, id).await?;
    adoption::Entity::delete_by_id(id).exec(db).await?;
    if adoption.status == AdoptionStatus::Pending {
        metrics::gauge!("shelterd_adoptions_pending").decrement(1.0);
    }
    Ok(())
}
