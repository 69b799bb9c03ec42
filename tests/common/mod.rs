#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use lms_admin_api::{
    app::app,
    auth::{issue_token, Claims},
    profile::{AdminProfile, StaticProfileSource},
    scope::ScopeUser,
    state::AppState,
};

pub const SECRET: &str = "integration-test-secret";

pub fn state() -> AppState {
    AppState::new(SECRET, false)
}

pub fn router() -> Router {
    app(state())
}

pub fn router_with_profiles(profiles: StaticProfileSource) -> Router {
    app(state().with_profiles(Arc::new(profiles)))
}

pub fn token_for(sub: &str, scope: ScopeUser) -> String {
    let claims = Claims::with_expiry(sub, format!("Admin {sub}"), scope, 1);
    issue_token(&claims, SECRET).expect("token")
}

pub fn profile(id: &str, scope: ScopeUser) -> AdminProfile {
    AdminProfile {
        id: id.to_string(),
        name: format!("Admin {id}"),
        email: Some(format!("{id}@example.com")),
        roles: vec!["admin".to_string()],
        permissions: vec!["courses.view".to_string()],
        scope,
    }
}

pub async fn get(router: Router, uri: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(Method::GET).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    send(router, builder.body(Body::empty())?).await
}

pub async fn post_json(router: Router, uri: &str, body: &Value) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body)?))?;
    send(router, request).await
}

pub async fn send(router: Router, request: Request<Body>) -> Result<(StatusCode, Value)> {
    let response = router.oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, body))
}
