use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    Name,
    StripeCustomerId,
    SubscriptionIsValid,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum UserTeams {
    Table,
    Id,
    UserId,
    TeamId,
    TeamRole,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Invites {
    Table,
    Id,
    TeamId,
    InviterId,
    InviteeEmail,
    TeamRole,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Teams::Table)
                .if_not_exists()
                .col(ColumnDef::new(Teams::Id).uuid().not_null().primary_key())
                .col(ColumnDef::new(Teams::Name).text().not_null())
                .col(ColumnDef::new(Teams::StripeCustomerId).text().not_null())
                .col(ColumnDef::new(Teams::SubscriptionIsValid).boolean().not_null())
                .col(
                    ColumnDef::new(Teams::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(Teams::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .to_owned(),
        )
        .await?;

        // Membership join table. The db generates ids so that accept-invite
        // can insert straight from a select without materializing the row.
        m.create_table(
            Table::create()
                .table(UserTeams::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(UserTeams::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .default(Expr::cust("gen_random_uuid()")),
                )
                .col(ColumnDef::new(UserTeams::UserId).uuid().not_null())
                .col(ColumnDef::new(UserTeams::TeamId).uuid().not_null())
                .col(ColumnDef::new(UserTeams::TeamRole).text().not_null())
                .col(
                    ColumnDef::new(UserTeams::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_teams_user")
                        .from(UserTeams::Table, UserTeams::UserId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_user_teams_team")
                        .from(UserTeams::Table, UserTeams::TeamId)
                        .to(Teams::Table, Teams::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        // One team per user, declared outright instead of trusting a
        // catchable duplicate-key error to exist. Accept-invite races
        // resolve against this index: first writer wins.
        m.create_index(
            Index::create()
                .name("ux_user_teams_user")
                .table(UserTeams::Table)
                .col(UserTeams::UserId)
                .unique()
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_user_teams_team")
                .table(UserTeams::Table)
                .col(UserTeams::TeamId)
                .to_owned(),
        )
        .await?;

        m.create_table(
            Table::create()
                .table(Invites::Table)
                .if_not_exists()
                .col(
                    ColumnDef::new(Invites::Id)
                        .uuid()
                        .not_null()
                        .primary_key()
                        .default(Expr::cust("gen_random_uuid()")),
                )
                .col(ColumnDef::new(Invites::TeamId).uuid().not_null())
                .col(ColumnDef::new(Invites::InviterId).uuid().not_null())
                .col(ColumnDef::new(Invites::InviteeEmail).text().not_null())
                .col(ColumnDef::new(Invites::TeamRole).text().not_null())
                .col(ColumnDef::new(Invites::Status).text().not_null())
                .col(
                    ColumnDef::new(Invites::CreatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .col(
                    ColumnDef::new(Invites::UpdatedAt)
                        .timestamp_with_time_zone()
                        .not_null()
                        .default(Expr::current_timestamp()),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invites_team")
                        .from(Invites::Table, Invites::TeamId)
                        .to(Teams::Table, Teams::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_invites_inviter")
                        .from(Invites::Table, Invites::InviterId)
                        .to(Users::Table, Users::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        )
        .await?;

        // Serializes concurrent sends to the same (team, email) pair into an
        // upsert on one row.
        m.create_index(
            Index::create()
                .name("ux_invites_team_invitee")
                .table(Invites::Table)
                .col(Invites::TeamId)
                .col(Invites::InviteeEmail)
                .unique()
                .to_owned(),
        )
        .await?;

        m.create_index(
            Index::create()
                .name("idx_invites_invitee_email")
                .table(Invites::Table)
                .col(Invites::InviteeEmail)
                .to_owned(),
        )
        .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Invites::Table).to_owned()).await?;
        m.drop_table(Table::drop().table(UserTeams::Table).to_owned()).await?;
        m.drop_table(Table::drop().table(Teams::Table).to_owned()).await?;
        Ok(())
    }
}
