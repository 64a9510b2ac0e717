use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::product::{NewProduct, Product};

const SELECT_COLUMNS: &str = "SELECT id, name, price, quantity, selected FROM products";

/// Storage capabilities the product service depends on
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Product>, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DatabaseError>;

    /// Insert a new row; the returned product carries the assigned identity
    async fn save(&self, product: NewProduct) -> Result<Product, DatabaseError>;

    /// Overwrite an existing row. Fails with `NotFound` if the id is unknown.
    async fn update(&self, product: &Product) -> Result<Product, DatabaseError>;

    /// Remove a row; unknown ids are ignored
    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError>;

    async fn count(&self) -> Result<i64, DatabaseError>;
}

pub struct SqlProductRepository {
    pool: SqlitePool,
}

impl SqlProductRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqlProductRepository {
    async fn find_all(&self) -> Result<Vec<Product>, DatabaseError> {
        let products = sqlx::query_as::<_, Product>(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        Ok(products)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Product>, DatabaseError> {
        let product = sqlx::query_as::<_, Product>(&format!("{} WHERE id = ?", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(product)
    }

    async fn save(&self, product: NewProduct) -> Result<Product, DatabaseError> {
        let result = sqlx::query(
            "INSERT INTO products (name, price, quantity, selected) VALUES (?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.selected)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            name: product.name,
            price: product.price,
            quantity: product.quantity,
            selected: product.selected,
        })
    }

    async fn update(&self, product: &Product) -> Result<Product, DatabaseError> {
        let result = sqlx::query(
            "UPDATE products SET name = ?, price = ?, quantity = ?, selected = ? WHERE id = ?",
        )
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.selected)
        .bind(product.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("product {}", product.id)));
        }
        Ok(product.clone())
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count(&self) -> Result<i64, DatabaseError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }
}
