use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamRemoveUser, RemoveMemberOutcome};
use crate::utils::webutils::{authed_user, require_ownership};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub message: String,
}

#[post("/remove")]
async fn remove_member(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    data: web::Json<RTeamRemoveUser>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = authed_user(&db, &auth).await?;
    let membership = require_ownership(&db, &caller).await?;

    match db
        .remove_member(membership.team_id, membership.user_id, data.user_id)
        .await?
    {
        RemoveMemberOutcome::Removed => Ok(ApiResponse::Ok(Response {
            message: "User has been removed from the team.".to_string(),
        })),
        RemoveMemberOutcome::NotInTeam => Err(AppError::NotFound),
    }
}
