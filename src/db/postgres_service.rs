use std::future::Future;
use std::pin::Pin;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};
use tracing::info;

use crate::types::error::AppError;

#[derive(Clone)]
pub struct PostgresService {
    pub(crate) database_connection: DatabaseConnection,
}

impl PostgresService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to PostgreSQL...");
        let database_connection = Database::connect(uri).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!("Connected to PostgreSQL.");
        Ok(Self {
            database_connection,
        })
    }

    /// Raw connection handle, for callers that need to run entity queries
    /// outside the service methods (integration tests, mostly).
    pub fn connection(&self) -> &DatabaseConnection {
        &self.database_connection
    }

    /// Scoped transaction: begins, runs the body, commits on `Ok`, rolls back
    /// on `Err` before the error reaches the caller. Multi-statement units
    /// (team creation, invite acceptance, member removal) all go through here
    /// so no partial state can leak out of a failed operation.
    pub(crate) async fn with_txn<T, F>(&self, body: F) -> Result<T, AppError>
    where
        T: Send,
        F: for<'c> FnOnce(
                &'c DatabaseTransaction,
            )
                -> Pin<Box<dyn Future<Output = Result<T, AppError>> + Send + 'c>>
            + Send,
    {
        self.database_connection
            .transaction(body)
            .await
            .map_err(AppError::from)
    }
}
