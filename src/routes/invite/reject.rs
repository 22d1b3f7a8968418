use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::ids::{Email, InviteId};
use crate::types::invite::RejectionOutcome;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::authed_user;

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[post("/{invite}/reject")]
pub async fn reject_invite(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    path: web::Path<String>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = authed_user(&db, &auth).await?;
    let email = Email::parse(&caller.email)?;

    if let Some(invite_id) = InviteId::parse(&path.into_inner()) {
        let RejectionOutcome::Success = db.reject_invite(invite_id, &email).await?;
    }

    Ok(ApiResponse::Ok(Response {
        message: "Invite rejected.".to_string(),
    }))
}
