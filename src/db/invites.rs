use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::ids::{Email, InviteId, TeamId, UserId};
use crate::types::invite::{
    AcceptanceOutcome, InboundInvite, OutboundInvite, RejectionOutcome, RevocationOutcome,
    SentInvite,
};
use chrono::Utc;
use entity::enums::{InviteStatus, TeamRole};
use entity::invite::{ActiveModel as InviteActive, Column as InviteColumn, Entity as Invite};
use sea_orm::sea_query::{Expr, OnConflict, Query};
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set, SqlErr,
};
use tracing::debug;
use uuid::Uuid;

#[derive(FromQueryResult)]
struct InboundInviteRow {
    id: Uuid,
    team_name: String,
    inviter_email: String,
}

#[derive(FromQueryResult)]
struct OutboundInviteRow {
    id: Uuid,
    inviter_email: String,
    invitee_email: String,
    team_role: TeamRole,
    status: InviteStatus,
    updated_at: chrono::DateTime<Utc>,
}

impl PostgresService {
    /// Issue (or refresh) an invite. The unique (team_id, invitee_email)
    /// index turns a repeat send into an upsert: status back to pending,
    /// role and timestamp overwritten, same row id.
    pub async fn send_invite(
        &self,
        team_id: TeamId,
        inviter_id: UserId,
        invitee: &Email,
        team_role: TeamRole,
    ) -> Result<SentInvite, AppError> {
        let now = Utc::now();
        let row = Invite::insert(InviteActive {
            id: Set(Uuid::new_v4()),
            team_id: Set(team_id.as_uuid()),
            inviter_id: Set(inviter_id.as_uuid()),
            invitee_email: Set(invitee.as_str().to_string()),
            team_role: Set(team_role),
            status: Set(InviteStatus::Pending),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .on_conflict(
            OnConflict::columns([InviteColumn::TeamId, InviteColumn::InviteeEmail])
                .update_columns([
                    InviteColumn::Status,
                    InviteColumn::TeamRole,
                    InviteColumn::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&self.database_connection)
        .await?;
        Ok(SentInvite::from(row))
    }

    /// Join a team from an invite. The membership insert selects straight
    /// out of the invites table, matching on BOTH the invite id and the
    /// authenticated email: a leaked invite id on its own matches nothing,
    /// and the whole check-and-join happens in one round trip. A concurrent
    /// accept that already put the user on a team trips the unique user
    /// constraint and comes back as `Duplicate`: first writer wins.
    pub async fn accept_invite(
        &self,
        invite_id: InviteId,
        recipient: &Email,
    ) -> Result<AcceptanceOutcome, AppError> {
        let recipient_email = recipient.as_str().to_string();
        self.with_txn(move |txn| {
            Box::pin(async move {
                let membership_select = Query::select()
                    .column((entity::user::Entity, entity::user::Column::Id))
                    .column((Invite, InviteColumn::TeamId))
                    .column((Invite, InviteColumn::TeamRole))
                    .from(Invite)
                    .inner_join(
                        entity::user::Entity,
                        Expr::col((entity::user::Entity, entity::user::Column::Email))
                            .equals((Invite, InviteColumn::InviteeEmail)),
                    )
                    .and_where(Expr::col((Invite, InviteColumn::Id)).eq(invite_id.as_uuid()))
                    .and_where(
                        Expr::col((Invite, InviteColumn::InviteeEmail)).eq(recipient_email),
                    )
                    .and_where(
                        Expr::col((Invite, InviteColumn::Status))
                            .is_in([InviteStatus::Created, InviteStatus::Pending]),
                    )
                    .to_owned();

                let insert = Query::insert()
                    .into_table(entity::user_team::Entity)
                    .columns([
                        entity::user_team::Column::UserId,
                        entity::user_team::Column::TeamId,
                        entity::user_team::Column::TeamRole,
                    ])
                    .select_from(membership_select)
                    .map_err(|e| AppError::Internal(e.to_string()))?
                    .to_owned();

                let statement = txn.get_database_backend().build(&insert);
                let inserted = match txn.execute(statement).await {
                    Ok(result) => result.rows_affected(),
                    Err(err) => {
                        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                            return Ok(AcceptanceOutcome::Duplicate);
                        }
                        return Err(err.into());
                    }
                };
                if inserted != 1 {
                    return Ok(AcceptanceOutcome::NoInvite);
                }

                Invite::update_many()
                    .col_expr(InviteColumn::Status, Expr::value(InviteStatus::Accepted))
                    .col_expr(InviteColumn::UpdatedAt, Expr::value(Utc::now()))
                    .filter(InviteColumn::Id.eq(invite_id.as_uuid()))
                    .exec(txn)
                    .await?;

                Ok(AcceptanceOutcome::Success)
            })
        })
        .await
    }

    /// Decline an invite. Unconditional: if nothing matches the id and the
    /// caller's email, the end state is the same as a successful rejection.
    pub async fn reject_invite(
        &self,
        invite_id: InviteId,
        recipient: &Email,
    ) -> Result<RejectionOutcome, AppError> {
        Invite::update_many()
            .col_expr(InviteColumn::Status, Expr::value(InviteStatus::Rejected))
            .col_expr(InviteColumn::UpdatedAt, Expr::value(Utc::now()))
            .filter(InviteColumn::Id.eq(invite_id.as_uuid()))
            .filter(InviteColumn::InviteeEmail.eq(recipient.as_str()))
            .exec(&self.database_connection)
            .await?;
        Ok(RejectionOutcome::Success)
    }

    /// Withdraw an invite the caller's team sent, if it is still active.
    pub async fn revoke_invite(
        &self,
        invite_id: InviteId,
        team_id: TeamId,
    ) -> Result<RevocationOutcome, AppError> {
        let result = Invite::update_many()
            .col_expr(InviteColumn::Status, Expr::value(InviteStatus::Revoked))
            .col_expr(InviteColumn::UpdatedAt, Expr::value(Utc::now()))
            .filter(InviteColumn::Id.eq(invite_id.as_uuid()))
            .filter(InviteColumn::TeamId.eq(team_id.as_uuid()))
            .filter(InviteColumn::Status.is_in([InviteStatus::Created, InviteStatus::Pending]))
            .exec(&self.database_connection)
            .await?;
        if result.rows_affected > 0 {
            return Ok(RevocationOutcome::Success);
        }

        // the caller gets one coarse failure; keep the real reason findable
        match Invite::find_by_id(invite_id.as_uuid())
            .one(&self.database_connection)
            .await?
        {
            Some(invite) => debug!(
                invite_id = %invite_id,
                status = ?invite.status,
                "revoke matched no active invite"
            ),
            None => debug!(invite_id = %invite_id, "revoke for unknown invite"),
        }
        Ok(RevocationOutcome::Failure)
    }

    /// Active invites addressed to an email, as the recipient sees them.
    pub async fn get_inbound_invites(&self, email: &Email) -> Result<Vec<InboundInvite>, AppError> {
        let rows = Invite::find()
            .select_only()
            .column(InviteColumn::Id)
            .column_as(entity::team::Column::Name, "team_name")
            .column_as(entity::user::Column::Email, "inviter_email")
            .join(JoinType::InnerJoin, entity::invite::Relation::Team.def())
            .join(JoinType::InnerJoin, entity::invite::Relation::Inviter.def())
            .filter(InviteColumn::InviteeEmail.eq(email.as_str()))
            .filter(InviteColumn::Status.is_in([InviteStatus::Created, InviteStatus::Pending]))
            .into_model::<InboundInviteRow>()
            .all(&self.database_connection)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| InboundInvite {
                id: InviteId::from(row.id),
                team_name: row.team_name,
                inviter_email: row.inviter_email,
            })
            .collect())
    }

    /// Everything a team has sent, any status.
    pub async fn get_outbound_invites(
        &self,
        team_id: TeamId,
    ) -> Result<Vec<OutboundInvite>, AppError> {
        let rows = Invite::find()
            .select_only()
            .column(InviteColumn::Id)
            .column_as(entity::user::Column::Email, "inviter_email")
            .column(InviteColumn::InviteeEmail)
            .column(InviteColumn::TeamRole)
            .column(InviteColumn::Status)
            .column(InviteColumn::UpdatedAt)
            .join(JoinType::InnerJoin, entity::invite::Relation::Inviter.def())
            .filter(InviteColumn::TeamId.eq(team_id.as_uuid()))
            .into_model::<OutboundInviteRow>()
            .all(&self.database_connection)
            .await?;
        Ok(rows
            .into_iter()
            .map(|row| OutboundInvite {
                id: InviteId::from(row.id),
                inviter_email: row.inviter_email,
                invitee_email: row.invitee_email,
                team_role: row.team_role,
                status: row.status,
                updated_at: row.updated_at,
            })
            .collect())
    }
}
