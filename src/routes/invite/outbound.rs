use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::invite::OutboundInvite;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::{authed_user, require_ownership};

#[get("/outbound")]
pub async fn outbound_invites(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<OutboundInvite>> {
    let caller = authed_user(&db, &auth).await?;
    let membership = require_ownership(&db, &caller).await?;
    let invites = db.get_outbound_invites(membership.team_id).await?;
    Ok(ApiResponse::Ok(invites))
}
