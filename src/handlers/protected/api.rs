// JSON API over products. Which roles may call each route is decided by
// the router from `SecurityConfig::rest_access`.
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::database::models::product::Product;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /products - all products
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    Ok(Json(state.products.find_all().await?))
}

/// GET /products/:id - one product, 404 when unknown
pub async fn show(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let id = product_id(id)?;
    Ok(Json(state.products.find_by_id(id).await?))
}

/// DELETE /products/:id - idempotent delete, no body
pub async fn remove(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = product_id(id)?;
    state.products.delete_by_id(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn product_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        ApiError::bad_request(format!("Invalid product id: {}", rejection.body_text()))
    })
}
