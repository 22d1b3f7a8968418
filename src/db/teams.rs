use crate::db::postgres_service::PostgresService;
use crate::ledger::{AccountOwner, LedgerGateway};
use crate::types::error::AppError;
use crate::types::ids::{Email, TeamId, UserId};
use crate::types::team::{Invitability, MembershipInfo, RemoveMemberOutcome, TeamMember};
use chrono::{Duration, Utc};
use std::sync::Arc;

use entity::enums::{BillableType, TeamRole};
use entity::team::{ActiveModel as TeamActive, Entity as Team};
use entity::user_team::{ActiveModel as UserTeamActive, Entity as UserTeam};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DbBackend, EntityTrait, FromQueryResult, QueryFilter, Set, SqlErr, Statement,
};
use uuid::Uuid;

#[derive(FromQueryResult)]
struct InvitabilityRow {
    invitee_email: String,
    team_id: Option<Uuid>,
    is_reinvitable: Option<bool>,
}

impl PostgresService {
    /// Create a team with `owner_id` as its owner. One transaction covers the
    /// team row, the ledger account (plus any personal-balance promotion),
    /// the owner membership, subscription re-billing and the deferred
    /// square-up record: either all of it lands or none of it does.
    pub async fn create_team(
        &self,
        ledger: Arc<dyn LedgerGateway>,
        owner_id: UserId,
        billing_ref: String,
        team_name: String,
    ) -> Result<TeamId, AppError> {
        let team_id = TeamId::new();
        self.with_txn(move |txn| {
            Box::pin(async move {
                let now = Utc::now();
                Team::insert(TeamActive {
                    id: Set(team_id.as_uuid()),
                    name: Set(team_name),
                    stripe_customer_id: Set(billing_ref),
                    subscription_is_valid: Set(true),
                    created_at: Set(now),
                    updated_at: Set(now),
                })
                .exec(txn)
                .await?;

                let team_account = ledger
                    .create_account(txn, AccountOwner::Team(team_id))
                    .await?;
                if let Some(user_account) = ledger
                    .get_account(txn, AccountOwner::User(owner_id))
                    .await?
                {
                    ledger
                        .transfer_balance(txn, &user_account, &team_account)
                        .await?;
                }

                let membership = UserTeam::insert(UserTeamActive {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(owner_id.as_uuid()),
                    team_id: Set(team_id.as_uuid()),
                    team_role: Set(TeamRole::Owner),
                    created_at: Set(now),
                })
                .exec(txn)
                .await;
                if let Err(err) = membership {
                    if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                        return Err(AppError::Conflict(
                            "owner already belongs to a team".to_string(),
                        ));
                    }
                    return Err(err.into());
                }

                // we don't know enough here to create a subscription row, but
                // any existing user-billed subscription becomes team-billed
                entity::subscription::Entity::update_many()
                    .col_expr(
                        entity::subscription::Column::BillableType,
                        Expr::value(BillableType::Team),
                    )
                    .col_expr(
                        entity::subscription::Column::BillableId,
                        Expr::value(team_id.as_uuid()),
                    )
                    .col_expr(entity::subscription::Column::UpdatedAt, Expr::value(now))
                    .filter(entity::subscription::Column::BillableType.eq(BillableType::User))
                    .filter(entity::subscription::Column::BillableId.eq(owner_id.as_uuid()))
                    .exec(txn)
                    .await?;

                entity::square_up::Entity::insert(entity::square_up::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(owner_id.as_uuid()),
                    team_id: Set(team_id.as_uuid()),
                    schedule_date: Set(now + Duration::minutes(30)),
                    status: Set("pending".to_string()),
                    created_at: Set(now),
                })
                .exec(txn)
                .await?;

                Ok(team_id)
            })
        })
        .await
    }

    /// Who is this email within the team system, if anyone.
    pub async fn get_membership_info(
        &self,
        email: &Email,
    ) -> Result<Option<MembershipInfo>, AppError> {
        let row = UserTeam::find()
            .inner_join(entity::user::Entity)
            .filter(entity::user::Column::Email.eq(email.as_str()))
            .one(&self.database_connection)
            .await?;
        Ok(row.map(|m| MembershipInfo {
            user_id: UserId::from(m.user_id),
            team_id: TeamId::from(m.team_id),
            team_role: m.team_role,
        }))
    }

    pub async fn get_team_members(&self, team_id: TeamId) -> Result<Vec<TeamMember>, AppError> {
        let rows = UserTeam::find()
            .filter(entity::user_team::Column::TeamId.eq(team_id.as_uuid()))
            .find_also_related(entity::user::Entity)
            .all(&self.database_connection)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(membership, user)| {
                user.map(|u| TeamMember {
                    id: UserId::from(u.id),
                    email: u.email,
                    full_name: u.full_name,
                    team_role: membership.team_role,
                })
            })
            .collect())
    }

    pub async fn get_team_name(&self, team_id: TeamId) -> Result<Option<String>, AppError> {
        Ok(Team::find_by_id(team_id.as_uuid())
            .one(&self.database_connection)
            .await?
            .map(|t| t.name))
    }

    /// Detach a member and hand their leftovers to the owner, atomically.
    /// Nobody may ever observe a user out of the team but still owning its
    /// api keys, so the three statements share one transaction.
    pub async fn remove_member(
        &self,
        team_id: TeamId,
        owner_id: UserId,
        target_id: UserId,
    ) -> Result<RemoveMemberOutcome, AppError> {
        self.with_txn(move |txn| {
            Box::pin(async move {
                let deleted = UserTeam::delete_many()
                    .filter(entity::user_team::Column::UserId.eq(target_id.as_uuid()))
                    .filter(entity::user_team::Column::TeamId.eq(team_id.as_uuid()))
                    .exec(txn)
                    .await?;
                if deleted.rows_affected == 0 {
                    // idempotent no-op, nothing was touched
                    return Ok(RemoveMemberOutcome::NotInTeam);
                }

                let now = Utc::now();
                entity::api_key::Entity::update_many()
                    .col_expr(
                        entity::api_key::Column::UserId,
                        Expr::value(owner_id.as_uuid()),
                    )
                    .filter(entity::api_key::Column::UserId.eq(target_id.as_uuid()))
                    .exec(txn)
                    .await?;

                entity::user::Entity::update_many()
                    .col_expr(
                        entity::user::Column::StripeCustomerId,
                        Expr::value(None::<String>),
                    )
                    .col_expr(
                        entity::user::Column::SubscriptionIsValid,
                        Expr::value(None::<bool>),
                    )
                    .col_expr(entity::user::Column::UpdatedAt, Expr::value(now))
                    .filter(entity::user::Column::Id.eq(target_id.as_uuid()))
                    .exec(txn)
                    .await?;

                Ok(RemoveMemberOutcome::Removed)
            })
        })
        .await
    }

    /// One correlated query answers three questions at once: is this email on
    /// a team already, and if not, has it been invited to this team within
    /// the last hour. Membership always wins over the re-invite cooldown.
    pub async fn determine_invitability(
        &self,
        team_id: TeamId,
        invitee_email: &Email,
    ) -> Result<Invitability, AppError> {
        let row = InvitabilityRow::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            r#"
            select
                search.email as invitee_email,
                user_teams.team_id as team_id,
                invites.updated_at <= now() - interval '1 hour' as is_reinvitable
            from (select cast($1 as text) as email) as search
            left join users
                on users.email = search.email
            left join user_teams
                on user_teams.user_id = users.id
            left join invites
                on invites.invitee_email = search.email
                and invites.team_id = $2
            "#,
            [
                invitee_email.as_str().into(),
                team_id.as_uuid().into(),
            ],
        ))
        .one(&self.database_connection)
        .await?;

        let Some(row) = row else {
            // the synthetic one-row select always matches; treat a miss as a
            // clean slate
            return Ok(Invitability::Invitable(invitee_email.clone()));
        };

        if let Some(existing_team) = row.team_id {
            return Ok(Invitability::AlreadyOnTeam(TeamId::from(existing_team)));
        }
        if row.is_reinvitable == Some(false) {
            return Ok(Invitability::TooManyInvites);
        }
        Ok(Invitability::Invitable(Email::parse(&row.invitee_email)?))
    }
}
