use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Durable record of the deferred post-creation reconciliation task. Written
/// inside the team creation transaction; a worker picks up due rows later, so
/// the schedule survives process restarts.
#[derive(Debug, Clone, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_creation_square_ups")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub team_id: Uuid,
    pub schedule_date: DateTimeUtc,
    pub status: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
