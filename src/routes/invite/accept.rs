use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::ids::{Email, InviteId};
use crate::types::invite::AcceptanceOutcome;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::authed_user;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[post("/{invite}/accept")]
pub async fn accept_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = authed_user(&db, &auth).await?;
    let email = Email::parse(&caller.email)?;

    // an id that doesn't even parse can't match a row; same outcome
    let outcome = match InviteId::parse(&path.into_inner()) {
        Some(invite_id) => db.accept_invite(invite_id, &email).await?,
        None => AcceptanceOutcome::NoInvite,
    };

    match outcome {
        AcceptanceOutcome::Success => Ok(ApiResponse::Ok(Response {
            message: "Successfully accepted invite and joined team!".to_string(),
        })),
        AcceptanceOutcome::NoInvite => Err(AppError::NotFound),
        AcceptanceOutcome::Duplicate => Err(AppError::Conflict(
            "already a member of a team".to_string(),
        )),
    }
}
