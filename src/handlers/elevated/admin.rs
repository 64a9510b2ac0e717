use axum::{
    extract::{
        rejection::{FormRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::database::models::product::{FieldErrors, ProductForm};
use crate::error::PageError;
use crate::middleware::AuthUser;
use crate::state::AppState;
use crate::views::{self, FormMode};

#[derive(Debug, Deserialize)]
pub struct IdParam {
    pub id: i64,
}

const LISTING: &str = "/user/products";

fn invalid_id(rejection: impl std::fmt::Display) -> PageError {
    tracing::debug!("Rejected product id: {}", rejection);
    PageError::BadRequest("Missing or invalid product id".to_string())
}

/// GET /admin/newProduct - empty product form
pub async fn new_product(Extension(user): Extension<AuthUser>) -> Result<Html<String>, PageError> {
    views::product_form(FormMode::Create, &user, &ProductForm::default(), &FieldErrors::default())
}

/// POST /admin/saveProduct - create a product or redisplay the form with errors
pub async fn save_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<ProductForm>,
) -> Result<Response, PageError> {
    match form.validate() {
        Ok(fields) => {
            state.products.add_product(fields.into()).await?;
            Ok(Redirect::to(LISTING).into_response())
        }
        Err(errors) => {
            let page = views::product_form(FormMode::Create, &user, &form, &errors)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// GET /admin/updateProduct?id= - edit form pre-filled from the stored product
pub async fn update_product_form(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    param: Result<Query<IdParam>, QueryRejection>,
) -> Result<Html<String>, PageError> {
    let Query(param) = param.map_err(invalid_id)?;
    let product = state.products.find_by_id(param.id).await?;
    views::product_form(
        FormMode::Edit,
        &user,
        &ProductForm::from_product(&product),
        &FieldErrors::default(),
    )
}

/// POST /admin/update - overwrite name, price and quantity
pub async fn update_product(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Form(form): Form<ProductForm>,
) -> Result<Response, PageError> {
    match (form.parse_id(), form.validate()) {
        (Ok(id), Ok(fields)) => {
            state.products.update_fields(id, fields).await?;
            Ok(Redirect::to(LISTING).into_response())
        }
        (id, fields) => {
            let mut errors = fields.err().unwrap_or_default();
            if let Err(id_errors) = id {
                errors.id = id_errors.id;
            }
            let page = views::product_form(FormMode::Edit, &user, &form, &errors)?;
            Ok((StatusCode::UNPROCESSABLE_ENTITY, page).into_response())
        }
    }
}

/// POST /admin/delete - delete by id; unknown ids still redirect
pub async fn delete_product(
    State(state): State<AppState>,
    param: Result<Form<IdParam>, FormRejection>,
) -> Result<Redirect, PageError> {
    let Form(param) = param.map_err(invalid_id)?;
    state.products.delete_by_id(param.id).await?;
    Ok(Redirect::to(LISTING))
}
