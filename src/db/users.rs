use crate::db::postgres_service::PostgresService;
use crate::types::{error::AppError, ids::Email, ids::UserId, user::DBUserCreate};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, Set};

impl PostgresService {
    pub async fn user_exists_by_email(&self, email: &Email) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email.as_str()))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: UserId) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(id.as_uuid())
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &Email) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email.as_str()))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_auth_hash(&self, id: UserId) -> Result<String, AppError> {
        Ok(self.get_user_by_id(id).await?.auth_hash)
    }

    /// Signup: create the bare user row. Team access comes later, through
    /// team creation or an accepted invite.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserId, AppError> {
        let email = Email::parse(&payload.email)?;
        if self.user_exists_by_email(&email).await? {
            return Err(AppError::AlreadyExists);
        }
        let uid = UserId::new();
        let now = Utc::now();
        User::insert(UserActive {
            id: Set(uid.as_uuid()),
            full_name: Set(payload.full_name),
            email: Set(email.as_str().to_string()),
            auth_hash: Set(payload.auth_hash),
            stripe_customer_id: Set(payload.stripe_customer_id),
            subscription_is_valid: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&self.database_connection)
        .await?;
        Ok(uid)
    }
}
