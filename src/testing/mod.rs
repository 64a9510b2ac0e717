use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::manager::DatabaseManager;
use crate::database::repository::SqlProductRepository;
use crate::services::ProductService;

/// Fresh migrated in-memory store
pub async fn memory_database() -> DatabaseManager {
    let db = DatabaseManager::connect(&AppConfig::test().database)
        .await
        .expect("in-memory database");
    db.migrate().await.expect("products table");
    db
}

/// Product service over an empty in-memory store
pub async fn memory_service() -> ProductService {
    let db = memory_database().await;
    ProductService::new(Arc::new(SqlProductRepository::new(db.pool().clone())))
}
