use actix_web::{web, App};
use std::sync::Arc;
use uuid::Uuid;

use scaffold_teams::config::MailConfig;
use scaffold_teams::db::postgres_service::PostgresService;
use scaffold_teams::ledger::{LedgerGateway, PostgresLedger};
use scaffold_teams::types::ids::{TeamId, UserId};
use scaffold_teams::types::user::DBUserCreate;
use scaffold_teams::utils::mail::Mailer;
use scaffold_teams::utils::token::{construct_token, encrypt, new_token};

pub struct TestClient {
    pub db: Arc<PostgresService>,
    pub ledger: Arc<PostgresLedger>,
}

impl TestClient {
    pub fn new(db: Arc<PostgresService>) -> Self {
        TestClient {
            db,
            ledger: Arc::new(PostgresLedger),
        }
    }

    #[allow(dead_code)]
    pub fn create_app(
        &self,
    ) -> actix_web::App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        // empty api key keeps the mailer in no-op mode
        let mailer = Arc::new(Mailer::new(MailConfig {
            api_key: String::new(),
            from_address: "noreply@test.local".to_string(),
        }));
        App::new()
            .app_data(web::Data::new(Arc::clone(&self.db)))
            .app_data(web::Data::new(Arc::clone(&self.ledger)))
            .app_data(web::Data::new(mailer))
            .configure(scaffold_teams::routes::configure_routes)
    }

    /// Seed a user with a billing ref and hand back a usable bearer token.
    #[allow(dead_code)]
    pub async fn create_test_user(&self, email: &str) -> (UserId, String) {
        let secret = new_token();
        let auth_hash = encrypt(&secret).expect("Failed to encrypt token");

        let user_id = self
            .db
            .create_user(DBUserCreate {
                full_name: "Test User".to_string(),
                email: email.to_string(),
                auth_hash,
                stripe_customer_id: Some(format!("cus_test_{}", Uuid::new_v4().simple())),
            })
            .await
            .expect("Failed to create user");

        let bearer = construct_token(&user_id.as_uuid(), &secret);
        (user_id, bearer)
    }

    /// Seed a user who owns a freshly created team.
    #[allow(dead_code)]
    pub async fn create_team_owner(
        &self,
        email: &str,
        team_name: &str,
    ) -> (UserId, TeamId, String) {
        let (owner_id, bearer) = self.create_test_user(email).await;
        let ledger: Arc<dyn LedgerGateway> = self.ledger.clone();
        let team_id = self
            .db
            .create_team(
                ledger,
                owner_id,
                format!("cus_test_{}", Uuid::new_v4().simple()),
                team_name.to_string(),
            )
            .await
            .expect("Failed to create team");
        (owner_id, team_id, bearer)
    }
}
