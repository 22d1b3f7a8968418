use actix_web::{dev::ServiceRequest, error::ErrorUnauthorized, web};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::enums::TeamRole;
use std::sync::Arc;

use crate::db::postgres_service::PostgresService;
use crate::types::error::AppError;
use crate::types::ids::{Email, UserId};
use crate::types::team::MembershipInfo;
use crate::utils::token::{extract_token_parts, verify};

pub async fn token_valid(db: &PostgresService, token: &str) -> bool {
    let Some((user_id, secret)) = extract_token_parts(token) else {
        return false;
    };
    match db.get_user_auth_hash(UserId::from(user_id)).await {
        Ok(hash) => verify(&secret, &hash).unwrap_or(false),
        Err(_) => false,
    }
}

pub async fn validate_token(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let Some(db) = req.app_data::<web::Data<Arc<PostgresService>>>() else {
        return Err((ErrorUnauthorized("Invalid token"), req));
    };
    if token_valid(db, credentials.token()).await {
        Ok(req)
    } else {
        Err((ErrorUnauthorized("Invalid token"), req))
    }
}

/// Resolve the authenticated user row from the bearer token. The middleware
/// already verified the secret; this re-reads the id for handler use.
pub async fn authed_user(
    db: &PostgresService,
    auth: &BearerAuth,
) -> Result<entity::user::Model, AppError> {
    let (user_id, _) = extract_token_parts(auth.token()).ok_or(AppError::Unauthorized)?;
    db.get_user_by_id(UserId::from(user_id))
        .await
        .map_err(|_| AppError::Unauthorized)
}

pub async fn require_membership(
    db: &PostgresService,
    user: &entity::user::Model,
) -> Result<MembershipInfo, AppError> {
    let email = Email::parse(&user.email)?;
    db.get_membership_info(&email)
        .await?
        .ok_or(AppError::Forbidden)
}

/// Ownership gate for invite issuance, revocation and member removal.
pub async fn require_ownership(
    db: &PostgresService,
    user: &entity::user::Model,
) -> Result<MembershipInfo, AppError> {
    let info = require_membership(db, user).await?;
    if info.team_role != TeamRole::Owner {
        return Err(AppError::Forbidden);
    }
    Ok(info)
}
