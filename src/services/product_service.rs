use std::sync::Arc;
use tracing::{debug, info};

use crate::database::manager::DatabaseError;
use crate::database::models::product::{NewProduct, Product, ProductFields};
use crate::database::repository::ProductRepository;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Product {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

/// CRUD orchestration over a product repository
#[derive(Clone)]
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    pub async fn add_product(&self, product: NewProduct) -> Result<Product, ServiceError> {
        let saved = self.repository.save(product).await?;
        info!("Created product {} ({})", saved.id, saved.name);
        Ok(saved)
    }

    pub async fn find_all(&self) -> Result<Vec<Product>, ServiceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Product, ServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        self.repository.delete_by_id(id).await?;
        debug!("Deleted product {} (if present)", id);
        Ok(())
    }

    /// Overwrite name, price and quantity. Identity and the selected flag
    /// are carried over from the stored row.
    pub async fn update_product_by_id(
        &self,
        id: i64,
        name: String,
        price: f64,
        quantity: i64,
    ) -> Result<Product, ServiceError> {
        let mut product = self.find_by_id(id).await?;
        product.name = name;
        product.price = price;
        product.quantity = quantity;

        let updated = match self.repository.update(&product).await {
            Ok(p) => p,
            // Row vanished between the read and the write
            Err(DatabaseError::NotFound(_)) => return Err(ServiceError::NotFound(id)),
            Err(e) => return Err(e.into()),
        };
        info!("Updated product {} ({})", updated.id, updated.name);
        Ok(updated)
    }

    pub async fn update_fields(
        &self,
        id: i64,
        fields: ProductFields,
    ) -> Result<Product, ServiceError> {
        self.update_product_by_id(id, fields.name, fields.price, fields.quantity)
            .await
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        Ok(self.repository.count().await?)
    }
}
