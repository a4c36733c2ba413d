use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "unknown")]
    Unknown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Deserialize, Serialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    #[sea_orm(string_value = "sheltered")]
    Sheltered,
    #[sea_orm(string_value = "adopted")]
    Adopted,
    #[sea_orm(string_value = "deceased")]
    Deceased,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "animals")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub breed_id: i32,
    pub name: String,
    pub sex: Sex,
    pub status: AnimalStatus,
    pub birth_date: Option<Date>,
    pub intake_date: Date,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    // Object key of the profile image in blob storage, if one was uploaded.
    pub image_object: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::breed::Entity",
        from = "Column::BreedId",
        to = "super::breed::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Breed,
    #[sea_orm(has_many = "super::adoption::Entity")]
    Adoption,
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
    #[sea_orm(has_many = "super::daily_task::Entity")]
    DailyTask,
    #[sea_orm(has_many = "super::daily_task_default_entry::Entity")]
    DailyTaskDefaultEntry,
}

impl Related<super::breed::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Breed.def()
    }
}

impl Related<super::adoption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Adoption.def()
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<super::daily_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
