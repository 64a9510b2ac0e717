use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::auth::Claims;
use crate::error::ApiError;
use crate::state::AppState;
use crate::types::Role;

/// Authenticated user context extracted from the session token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub username: String,
    pub roles: Vec<Role>,
}

impl AuthUser {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            roles: claims.roles,
        }
    }
}

/// Session check for browser pages: anonymous requests go to the login form
pub async fn page_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(reason) => {
            tracing::debug!("Redirecting {} to login: {}", request.uri().path(), reason);
            Redirect::to("/login").into_response()
        }
    }
}

/// Session check for the JSON API: anonymous requests get a 401 body
pub async fn api_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(reason) => ApiError::unauthorized(reason).into_response(),
    }
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, String> {
    let token = extract_session_token(headers, state.session_cookie())
        .ok_or_else(|| "Authentication required".to_string())?;

    let claims = state
        .auth
        .resolve(&token)
        .await
        .map_err(|e| e.to_string())?;

    Ok(AuthUser::from(claims))
}

/// Session token from the session cookie, or from a Bearer Authorization header
pub fn extract_session_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    if let Some(token) = cookie_value(headers, cookie_name) {
        return Some(token);
    }

    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

fn cookie_value(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == cookie_name && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// `Set-Cookie` value carrying a freshly issued session token
pub fn session_cookie(cookie_name: &str, token: &str, max_age_secs: i64) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        cookie_name, token, max_age_secs
    )
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_session_cookie(cookie_name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", cookie_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_token_from_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; INVENTORY_SESSION=abc.def.ghi"),
        );
        assert_eq!(
            extract_session_token(&headers, "INVENTORY_SESSION").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn falls_back_to_bearer_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer tok"));
        assert_eq!(extract_session_token(&headers, "INVENTORY_SESSION").as_deref(), Some("tok"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjox"));
        assert_eq!(extract_session_token(&headers, "INVENTORY_SESSION"), None);
    }

    #[test]
    fn ignores_cleared_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("INVENTORY_SESSION="));
        assert_eq!(extract_session_token(&headers, "INVENTORY_SESSION"), None);
    }

    #[test]
    fn formats_cookies() {
        assert_eq!(
            session_cookie("S", "t", 60),
            "S=t; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
        assert!(expired_session_cookie("S").contains("Max-Age=0"));
    }
}
