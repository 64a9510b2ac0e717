// handlers/public/login.rs - form login and logout
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use crate::error::PageError;
use crate::middleware::auth::{expired_session_cookie, extract_session_token, session_cookie};
use crate::state::AppState;
use crate::views;

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    /// Present after a failed login attempt
    pub error: Option<String>,
    /// Present after logout
    pub logout: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login - login form
pub async fn login_page(Query(query): Query<LoginQuery>) -> Result<Html<String>, PageError> {
    views::login_page(query.error.is_some(), query.logout.is_some())
}

/// POST /login - check credentials, open a session and go to the listing
pub async fn login_post(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    match state.auth.login(form.username.trim(), &form.password).await {
        Ok(issued) => {
            let cookie = session_cookie(state.session_cookie(), &issued.token, issued.max_age_secs);
            ([(header::SET_COOKIE, cookie)], Redirect::to("/user/products")).into_response()
        }
        Err(_) => Redirect::to("/login?error=true").into_response(),
    }
}

/// POST /logout - close the session and clear the cookie
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = extract_session_token(&headers, state.session_cookie()) {
        state.auth.logout(&token).await;
    }
    let cookie = expired_session_cookie(state.session_cookie());
    ([(header::SET_COOKIE, cookie)], Redirect::to("/login?logout")).into_response()
}
