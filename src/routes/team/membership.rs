use actix_web::{get, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::ids::Email;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::MembershipInfo;
use crate::utils::webutils::authed_user;

#[get("/membership")]
async fn membership_info(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    auth: BearerAuth,
) -> ApiResult<MembershipInfo> {
    let caller = authed_user(&db, &auth).await?;
    let email = Email::parse(&caller.email)?;
    match db.get_membership_info(&email).await? {
        Some(info) => Ok(ApiResponse::Ok(info)),
        None => Err(AppError::NotFound),
    }
}
