use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;
use tracing::info;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::ids::Email;
use crate::types::invite::SentInvite;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{Invitability, RTeamInviteUser};
use crate::utils::mail::Mailer;
use crate::utils::webutils::{authed_user, require_ownership};

#[post("")]
async fn send_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    mailer: web::Data<Arc<Mailer>>,
    data: web::Json<RTeamInviteUser>,
    auth: BearerAuth,
) -> ApiResult<SentInvite> {
    let caller = authed_user(&db, &auth).await?;
    let membership = require_ownership(&db, &caller).await?;
    let invitee = Email::parse(&data.invitee_email)?;

    let invitee = match db
        .determine_invitability(membership.team_id, &invitee)
        .await?
    {
        Invitability::AlreadyOnTeam(_) => return Err(AppError::AlreadyExists),
        Invitability::TooManyInvites => return Err(AppError::RateLimited),
        Invitability::Invitable(email) => email,
    };

    let invite = db
        .send_invite(
            membership.team_id,
            membership.user_id,
            &invitee,
            data.team_role,
        )
        .await?;
    info!(team_id = %membership.team_id, invite_id = %invite.id, "invite issued");

    // notification only; the invite row is already durable
    if let Some(team_name) = db.get_team_name(membership.team_id).await? {
        mailer
            .send_team_invite(&invitee, &team_name, &invite.id)
            .await
            .ok();
    }

    Ok(ApiResponse::Ok(invite))
}
