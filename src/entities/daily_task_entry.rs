use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Deserialize, Serialize)]
#[sea_orm(table_name = "daily_task_entries")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip_deserializing)]
    pub id: i32,
    pub daily_task_id: i32,
    pub title: String,
    pub is_done: bool,
    pub completed_at: Option<DateTime>,
    pub completed_by_user_id: Option<i32>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::daily_task::Entity",
        from = "Column::DailyTaskId",
        to = "super::daily_task::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    DailyTask,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CompletedByUserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    CompletedByUser,
}

impl Related<super::daily_task::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyTask.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
