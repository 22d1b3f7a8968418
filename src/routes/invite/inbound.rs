use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::ids::Email;
use crate::types::invite::InboundInvite;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::authed_user;

#[get("/inbound")]
pub async fn inbound_invites(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<InboundInvite>> {
    let caller = authed_user(&db, &auth).await?;
    let email = Email::parse(&caller.email)?;
    let invites = db.get_inbound_invites(&email).await?;
    Ok(ApiResponse::Ok(invites))
}
