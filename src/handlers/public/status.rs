use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Redirect},
};
use serde_json::json;

use crate::state::AppState;

/// GET / - send browsers to the product listing
pub async fn root() -> Redirect {
    Redirect::to("/user/products")
}

/// GET /health - liveness, store connectivity and a few counters
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let products = match state.database.health_check().await {
        Ok(()) => state.products.count().await.map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };

    match products {
        Ok(products) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "version": env!("CARGO_PKG_VERSION"),
                    "database": "ok",
                    "products": products,
                    "sessions": state.auth.active_sessions().await
                }
            })),
        ),
        Err(e) => {
            // Store details stay in the log
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": {
                        "status": "degraded",
                        "timestamp": now
                    }
                })),
            )
        }
    }
}
