use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum ApiKeys {
    Table,
    Id,
    UserId,
    Name,
    KeyHash,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    Id,
    BillableType,
    BillableId,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TeamCreationSquareUps {
    Table,
    Id,
    UserId,
    TeamId,
    ScheduleDate,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CustomerAccounts {
    Table,
    Id,
    OwnerType,
    OwnerId,
    BalanceCents,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(ApiKeys::Table)
                .if_not_exists()
                .col(ColumnDef::new(ApiKeys::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(ApiKeys::UserId).uuid().not_null())
                .col(ColumnDef::new(ApiKeys::Name).text().not_null())
                .col(ColumnDef::new(ApiKeys::KeyHash).text().not_null())
                .col(
                    ColumnDef::new(ApiKeys::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_api_keys_user")
                        .from(ApiKeys::Table, ApiKeys::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_api_keys_user")
                .table(ApiKeys::Table)
                .col(ApiKeys::UserId)
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(Subscriptions::Table)
                .if_not_exists()
                .col(ColumnDef::new(Subscriptions::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Subscriptions::BillableType).text().not_null())
                .col(ColumnDef::new(Subscriptions::BillableId).uuid().not_null())
                .col(ColumnDef::new(Subscriptions::Status).text().not_null())
                .col(
                    ColumnDef::new(Subscriptions::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(Subscriptions::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_subscriptions_billable")
                .table(Subscriptions::Table)
                .col(Subscriptions::BillableType)
                .col(Subscriptions::BillableId)
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(TeamCreationSquareUps::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(TeamCreationSquareUps::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .default(Expr::cust("gen_random_uuid()")),
                )
                .col(ColumnDef::new(TeamCreationSquareUps::UserId).uuid().not_null())
                .col(ColumnDef::new(TeamCreationSquareUps::TeamId).uuid().not_null())
                .col(
                    ColumnDef::new(TeamCreationSquareUps::ScheduleDate)
                        .timestamp_with_time_zone()
                        .not_null(),
                )
                .col(ColumnDef::new(TeamCreationSquareUps::Status).text().not_null())
                .col(
                    ColumnDef::new(TeamCreationSquareUps::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        // Ledger accounts share the database with the store, so team creation
        // can mutate both inside one transaction.
        m.create_table(
            Table::create()
                .table(CustomerAccounts::Table)
                .if_not_exists()
                .col(ColumnDef::new(CustomerAccounts::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(CustomerAccounts::OwnerType).text().not_null())
                .col(ColumnDef::new(CustomerAccounts::OwnerId).uuid().not_null())
                .col(
                    ColumnDef::new(CustomerAccounts::BalanceCents)
                        .big_integer()
                        .not_null()
                        .default(0),
                )
                .col(
                    ColumnDef::new(CustomerAccounts::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(CustomerAccounts::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("ux_customer_accounts_owner")
                .table(CustomerAccounts::Table)
                .col(CustomerAccounts::OwnerType)
                .col(CustomerAccounts::OwnerId)
                .unique()
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(CustomerAccounts::Table).to_owned()).await?;
        m.drop_table(Table::drop().table(TeamCreationSquareUps::Table).to_owned()).await?;
        m.drop_table(Table::drop().table(Subscriptions::Table).to_owned()).await?;
        m.drop_table(Table::drop().table(ApiKeys::Table).to_owned()).await?;
        Ok(())
    }
}
