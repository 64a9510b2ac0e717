use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::auth::{AuthError, Authenticator};
use crate::config::AppConfig;
use crate::database::{DatabaseError, DatabaseManager, SqlProductRepository};
use crate::services::bootstrap::seed_products;
use crate::services::{ProductService, ServiceError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database startup failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Authentication setup failed: {0}")]
    Auth(#[from] AuthError),

    #[error("Seeding sample products failed: {0}")]
    Seed(#[from] ServiceError),
}

/// Everything a handler may depend on, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub database: DatabaseManager,
    pub products: ProductService,
    pub auth: Arc<Authenticator>,
}

impl AppState {
    /// Connect the store, create the schema, load the accounts and seed the
    /// sample catalogue when the configuration asks for it.
    pub async fn build(config: AppConfig) -> Result<Self, StartupError> {
        let database = DatabaseManager::connect(&config.database).await?;
        database.migrate().await?;

        let repository = SqlProductRepository::new(database.pool().clone());
        let products = ProductService::new(Arc::new(repository));

        let auth = Authenticator::new(&config.security)?;

        if config.bootstrap.seed_on_startup {
            seed_products(&products).await?;
        } else {
            info!("Skipping sample product seeding");
        }

        Ok(Self {
            config: Arc::new(config),
            database,
            products,
            auth: Arc::new(auth),
        })
    }

    pub fn session_cookie(&self) -> &str {
        &self.config.security.session_cookie
    }
}
