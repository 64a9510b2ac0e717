use tracing::info;

use crate::database::models::product::NewProduct;
use crate::services::product_service::{ProductService, ServiceError};

/// Sample catalogue inserted on startup
pub fn sample_products() -> Vec<NewProduct> {
    vec![
        NewProduct::new("ordinateur", 5000.0, 12, Some(true)),
        NewProduct::new("telephone", 2500.0, 5, Some(true)),
        NewProduct::new("tablette", 3000.0, 10, Some(false)),
        NewProduct::new("souris", 250.0, 50, Some(true)),
        NewProduct::new("clavier", 500.0, 36, Some(false)),
        NewProduct::new("chargeur", 600.0, 25, Some(true)),
    ]
}

pub async fn seed_products(service: &ProductService) -> Result<usize, ServiceError> {
    let samples = sample_products();
    let count = samples.len();
    for product in samples {
        service.add_product(product).await?;
    }
    info!("Seeded {} sample products", count);
    Ok(count)
}
