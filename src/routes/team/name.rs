use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::{authed_user, require_membership};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub name: String,
}

#[get("/name")]
async fn team_name(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let caller = authed_user(&db, &auth).await?;
    let membership = require_membership(&db, &caller).await?;
    match db.get_team_name(membership.team_id).await? {
        Some(name) => Ok(ApiResponse::Ok(Response { name })),
        None => Err(AppError::NotFound),
    }
}
