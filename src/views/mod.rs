use axum::http::StatusCode;
use axum::response::Html;
use once_cell::sync::Lazy;
use serde::Serialize;
use tera::{Context, Tera};

use crate::database::models::product::{FieldErrors, Product, ProductForm};
use crate::error::PageError;
use crate::middleware::AuthUser;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("login.html", include_str!("../../templates/login.html")),
    ("products.html", include_str!("../../templates/products.html")),
    ("product_form.html", include_str!("../../templates/product_form.html")),
    ("not_authorized.html", include_str!("../../templates/not_authorized.html")),
    ("error.html", include_str!("../../templates/error.html")),
];

// Templates are compiled into the binary; a parse failure is a build defect
static VIEWS: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().copied())
        .expect("built-in templates must parse");
    tera
});

#[derive(Debug, Serialize)]
struct ViewUser<'a> {
    username: &'a str,
    is_admin: bool,
}

impl<'a> From<&'a AuthUser> for ViewUser<'a> {
    fn from(user: &'a AuthUser) -> Self {
        Self {
            username: &user.username,
            is_admin: user.is_admin(),
        }
    }
}

/// Which product form is being shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

impl FormMode {
    fn action(&self) -> &'static str {
        match self {
            FormMode::Create => "/admin/saveProduct",
            FormMode::Edit => "/admin/update",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            FormMode::Create => "New product",
            FormMode::Edit => "Update product",
        }
    }
}

fn render(name: &str, context: &Context) -> Result<Html<String>, PageError> {
    Ok(Html(VIEWS.render(name, context)?))
}

pub fn login_page(error: bool, logged_out: bool) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("error", &error);
    context.insert("logged_out", &logged_out);
    render("login.html", &context)
}

pub fn products_page(user: &AuthUser, products: &[Product]) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("user", &ViewUser::from(user));
    context.insert("products", products);
    render("products.html", &context)
}

pub fn product_form(
    mode: FormMode,
    user: &AuthUser,
    form: &ProductForm,
    errors: &FieldErrors,
) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("user", &ViewUser::from(user));
    context.insert("title", mode.title());
    context.insert("action", mode.action());
    context.insert("editing", &(mode == FormMode::Edit));
    context.insert("form", form);
    context.insert("errors", errors);
    render("product_form.html", &context)
}

pub fn not_authorized_page(user: &AuthUser) -> Result<Html<String>, PageError> {
    let mut context = Context::new();
    context.insert("user", &ViewUser::from(user));
    render("not_authorized.html", &context)
}

/// Error page body. Falls back to plain markup if the template itself fails.
pub fn error_page(status: StatusCode, message: &str) -> String {
    let mut context = Context::new();
    context.insert("status", &status.as_u16());
    context.insert("reason", status.canonical_reason().unwrap_or("Error"));
    context.insert("message", message);
    VIEWS.render("error.html", &context).unwrap_or_else(|e| {
        tracing::error!("Failed to render error page: {}", e);
        format!("<h1>{}</h1>", status)
    })
}
