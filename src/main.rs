use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use tracing::info;

use scaffold_teams::config::EnvConfig;
use scaffold_teams::db::postgres_service::PostgresService;
use scaffold_teams::ledger::PostgresLedger;
use scaffold_teams::routes::configure_routes;
use scaffold_teams::utils::mail::Mailer;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );
    let ledger = Arc::new(PostgresLedger);
    let mailer = Arc::new(Mailer::new(config.mail.clone()));

    info!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(web::Data::new(Arc::clone(&ledger)))
            .app_data(web::Data::new(Arc::clone(&mailer)))
            .app_data(web::Data::new(config.clone()))
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
