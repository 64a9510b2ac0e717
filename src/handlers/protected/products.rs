use axum::{extract::State, response::Html, Extension};

use crate::error::PageError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::views;

/// GET /user/products - product listing
pub async fn index(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Html<String>, PageError> {
    let products = state.products.find_all().await?;
    views::products_page(&user, &products)
}

/// GET /notAuthorized - target of the role-denial redirect
pub async fn not_authorized(
    Extension(user): Extension<AuthUser>,
) -> Result<Html<String>, PageError> {
    views::not_authorized_page(&user)
}
