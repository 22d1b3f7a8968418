use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::TeamMember;
use crate::utils::webutils::{authed_user, require_membership};

#[get("/members")]
async fn team_members(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Vec<TeamMember>> {
    let caller = authed_user(&db, &auth).await?;
    let membership = require_membership(&db, &caller).await?;
    let members = db.get_team_members(membership.team_id).await?;
    Ok(ApiResponse::Ok(members))
}
