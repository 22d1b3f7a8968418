use actix_web::{post, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::ledger::{LedgerGateway, PostgresLedger};
use crate::types::error::AppError;
use crate::types::ids::UserId;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::RTeamCreate;
use crate::utils::webutils::authed_user;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    pub message: String,
}

#[post("")]
async fn create_team(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<PostgresService>>,
    ledger: web::Data<Arc<PostgresLedger>>,
    data: web::Json<RTeamCreate>,
    auth: BearerAuth,
) -> ApiResult<Response> {
    let name = data.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("team name must not be empty".into()));
    }

    let caller = authed_user(&db, &auth).await?;
    let billing_ref = caller
        .stripe_customer_id
        .clone()
        .ok_or_else(|| AppError::BadRequest("no billing account on file".into()))?;

    let ledger: Arc<dyn LedgerGateway> = ledger.get_ref().clone();
    let team_id = db
        .create_team(
            ledger,
            UserId::from(caller.id),
            billing_ref,
            name.to_string(),
        )
        .await?;

    Ok(ApiResponse::Created(Response {
        id: team_id.to_string(),
        message: format!("Team {} has been successfully created.", name),
    }))
}
