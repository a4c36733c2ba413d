use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per animal per calendar date.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "daily_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub animal_id: i32,
    pub date: Date,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::animal::Entity",
        from = "Column::AnimalId",
        to = "super::animal::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Animal,
    #[sea_orm(has_many = "super::daily_task_entry::Entity")]
    DailyTaskEntry,
}

impl Related<super::animal::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Animal.def()
    }
}

impl Related<super::daily_task_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyTaskEntry.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
