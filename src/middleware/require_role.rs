use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::error::ApiError;
use crate::types::Role;

use super::auth::AuthUser;

/// Page route that needs the USER role
pub async fn require_user_page(request: Request, next: Next) -> Response {
    authorize_page(Role::User, request, next).await
}

/// Page route that needs the ADMIN role
pub async fn require_admin_page(request: Request, next: Next) -> Response {
    authorize_page(Role::Admin, request, next).await
}

/// API route that needs the USER role
pub async fn require_user_api(request: Request, next: Next) -> Response {
    authorize_api(Role::User, request, next).await
}

/// API route that needs the ADMIN role
pub async fn require_admin_api(request: Request, next: Next) -> Response {
    authorize_api(Role::Admin, request, next).await
}

async fn authorize_page(role: Role, request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.has_role(role) => next.run(request).await,
        Some(user) => {
            tracing::warn!(
                "Denied {} {} to '{}': {} role required",
                request.method(),
                request.uri().path(),
                user.username,
                role
            );
            Redirect::to("/notAuthorized").into_response()
        }
        // Session layer did not run
        None => Redirect::to("/login").into_response(),
    }
}

async fn authorize_api(role: Role, request: Request, next: Next) -> Response {
    match request.extensions().get::<AuthUser>() {
        Some(user) if user.has_role(role) => next.run(request).await,
        Some(user) => {
            tracing::warn!(
                "Denied {} {} to '{}': {} role required",
                request.method(),
                request.uri().path(),
                user.username,
                role
            );
            ApiError::forbidden(format!("{} role required", role)).into_response()
        }
        None => ApiError::unauthorized("Authentication required").into_response(),
    }
}
