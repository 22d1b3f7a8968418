use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::AccountOwnerType;

/// Ledger-side balance account, keyed by its owner (a user or a team).
/// Owned by the ledger gateway; the membership code never touches it directly.
#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "customer_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_type: AccountOwnerType,
    pub owner_id: Uuid,
    pub balance_cents: i64,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
