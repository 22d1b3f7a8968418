use async_trait::async_trait;
use chrono::Utc;
use entity::customer_account::{
    ActiveModel as AccountActive, Column as AccountColumn, Entity as CustomerAccount,
};
use entity::enums::AccountOwnerType;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

use crate::types::error::AppError;
use crate::types::ids::{TeamId, UserId};

pub type LedgerAccount = entity::customer_account::Model;

#[derive(Debug, Clone, Copy)]
pub enum AccountOwner {
    User(UserId),
    Team(TeamId),
}

impl AccountOwner {
    fn parts(&self) -> (AccountOwnerType, Uuid) {
        match self {
            AccountOwner::User(id) => (AccountOwnerType::User, id.as_uuid()),
            AccountOwner::Team(id) => (AccountOwnerType::Team, id.as_uuid()),
        }
    }
}

/// Boundary to the billing-account ledger. Team creation is the only caller.
/// Every method runs against a caller-supplied transaction handle so ledger
/// mutations commit or roll back together with the store mutations around
/// them (the ledger shares the Postgres instance).
#[async_trait]
pub trait LedgerGateway: Send + Sync {
    async fn create_account(
        &self,
        txn: &DatabaseTransaction,
        owner: AccountOwner,
    ) -> Result<LedgerAccount, AppError>;

    async fn get_account(
        &self,
        txn: &DatabaseTransaction,
        owner: AccountOwner,
    ) -> Result<Option<LedgerAccount>, AppError>;

    /// Move the full balance of `from` onto `to`, leaving `from` at zero.
    async fn transfer_balance(
        &self,
        txn: &DatabaseTransaction,
        from: &LedgerAccount,
        to: &LedgerAccount,
    ) -> Result<(), AppError>;
}

pub struct PostgresLedger;

#[async_trait]
impl LedgerGateway for PostgresLedger {
    async fn create_account(
        &self,
        txn: &DatabaseTransaction,
        owner: AccountOwner,
    ) -> Result<LedgerAccount, AppError> {
        let (owner_type, owner_id) = owner.parts();
        let now = Utc::now();
        let account = AccountActive {
            id: Set(Uuid::new_v4()),
            owner_type: Set(owner_type),
            owner_id: Set(owner_id),
            balance_cents: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(txn)
        .await?;
        Ok(account)
    }

    async fn get_account(
        &self,
        txn: &DatabaseTransaction,
        owner: AccountOwner,
    ) -> Result<Option<LedgerAccount>, AppError> {
        let (owner_type, owner_id) = owner.parts();
        Ok(CustomerAccount::find()
            .filter(AccountColumn::OwnerType.eq(owner_type))
            .filter(AccountColumn::OwnerId.eq(owner_id))
            .one(txn)
            .await?)
    }

    async fn transfer_balance(
        &self,
        txn: &DatabaseTransaction,
        from: &LedgerAccount,
        to: &LedgerAccount,
    ) -> Result<(), AppError> {
        let now = Utc::now();
        CustomerAccount::update_many()
            .col_expr(
                AccountColumn::BalanceCents,
                Expr::col(AccountColumn::BalanceCents).add(from.balance_cents),
            )
            .col_expr(AccountColumn::UpdatedAt, Expr::value(now))
            .filter(AccountColumn::Id.eq(to.id))
            .exec(txn)
            .await?;
        CustomerAccount::update_many()
            .col_expr(AccountColumn::BalanceCents, Expr::value(0i64))
            .col_expr(AccountColumn::UpdatedAt, Expr::value(now))
            .filter(AccountColumn::Id.eq(from.id))
            .exec(txn)
            .await?;
        Ok(())
    }
}
