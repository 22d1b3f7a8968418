use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::ids::InviteId;
use crate::types::invite::RevocationOutcome;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::{authed_user, require_ownership};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[post("/{invite}/revoke")]
pub async fn revoke_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = authed_user(&db, &auth).await?;
    let membership = require_ownership(&db, &caller).await?;

    let outcome = match InviteId::parse(&path.into_inner()) {
        Some(invite_id) => db.revoke_invite(invite_id, membership.team_id).await?,
        None => RevocationOutcome::Failure,
    };

    match outcome {
        RevocationOutcome::Success => Ok(ApiResponse::Ok(Response {
            message: "Invite revoked.".to_string(),
        })),
        RevocationOutcome::Failure => Err(AppError::BadRequest(
            "invite could not be revoked".to_string(),
        )),
    }
}
