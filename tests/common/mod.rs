#![allow(dead_code)]

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use inventory_web::config::AppConfig;
use inventory_web::types::RestAccess;
use inventory_web::AppState;

/// In-process application driven through `tower::ServiceExt::oneshot`
pub struct TestApp {
    pub state: AppState,
    router: Router,
}

impl TestApp {
    /// Seeded application with the default role-based API policy
    pub async fn spawn() -> Result<Self> {
        Self::with_config(AppConfig::test()).await
    }

    pub async fn with_rest_access(rest_access: RestAccess) -> Result<Self> {
        let mut config = AppConfig::test();
        config.security.rest_access = rest_access;
        Self::with_config(config).await
    }

    pub async fn with_config(config: AppConfig) -> Result<Self> {
        let state = AppState::build(config).await.context("failed to build app state")?;
        let router = inventory_web::app(state.clone());
        Ok(Self { state, router })
    }

    pub async fn send(&self, request: Request<Body>) -> Result<Response<Body>> {
        let response = self.router.clone().oneshot(request).await?;
        Ok(response)
    }

    pub async fn get(&self, uri: &str, session: Option<&str>) -> Result<Response<Body>> {
        self.send(request(Method::GET, uri, session, Body::empty(), None)?).await
    }

    pub async fn delete(&self, uri: &str, session: Option<&str>) -> Result<Response<Body>> {
        self.send(request(Method::DELETE, uri, session, Body::empty(), None)?).await
    }

    pub async fn post_form(
        &self,
        uri: &str,
        form: &str,
        session: Option<&str>,
    ) -> Result<Response<Body>> {
        let body = Body::from(form.to_string());
        self.send(request(
            Method::POST,
            uri,
            session,
            body,
            Some("application/x-www-form-urlencoded"),
        )?)
        .await
    }

    /// Log in through the form and return the `Cookie` header value for the session
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        let form = format!("username={}&password={}", username, password);
        let response = self.post_form("/login", &form, None).await?;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "login should redirect");
        assert_eq!(location(&response), Some("/user/products"), "login for {} failed", username);
        session_from(&response).context("login response carried no session cookie")
    }

    pub async fn product_count(&self) -> Result<usize> {
        Ok(self.state.products.count().await? as usize)
    }
}

fn request(
    method: Method,
    uri: &str,
    session: Option<&str>,
    body: Body,
    content_type: Option<&str>,
) -> Result<Request<Body>> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = session {
        builder = builder.header(header::COOKIE, cookie);
    }
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    Ok(builder.body(body)?)
}

/// `name=value` pair of the Set-Cookie header, ready to send back as `Cookie`
pub fn session_from(response: &Response<Body>) -> Option<String> {
    let set_cookie = response.headers().get(header::SET_COOKIE)?.to_str().ok()?;
    set_cookie.split(';').next().map(|pair| pair.trim().to_string())
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response.headers().get(header::LOCATION)?.to_str().ok()
}

pub async fn body_string(response: Response<Body>) -> Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(response: Response<Body>) -> Result<serde_json::Value> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&bytes)?)
}

/// Serve the app on a free local port for tests that need a real HTTP client
pub async fn serve(config: AppConfig) -> Result<(SocketAddr, AppState)> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    let state = AppState::build(config).await?;
    let app = inventory_web::app(state.clone());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((addr, state))
}
