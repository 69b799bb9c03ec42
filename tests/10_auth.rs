mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use lms_admin_api::scope::ScopeUser;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let (status, body) = common::get(common::router(), "/health", None).await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["upstream"], "not_configured");
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_bearer_token() -> Result<()> {
    for uri in ["/api/auth/whoami", "/api/auth/profile", "/api/scope/centers"] {
        let (status, body) = common::get(common::router(), uri, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["code"], "UNAUTHORIZED");
    }
    Ok(())
}

#[tokio::test]
async fn token_signed_with_other_secret_is_rejected() -> Result<()> {
    let claims = lms_admin_api::auth::Claims::with_expiry("1", "Admin", ScopeUser::default(), 1);
    let token = lms_admin_api::auth::issue_token(&claims, "some-other-secret")?;

    let (status, _) = common::get(common::router(), "/api/auth/whoami", Some(&token)).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn non_bearer_scheme_is_rejected() -> Result<()> {
    let request = Request::builder()
        .uri("/api/auth/whoami")
        .header(header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4=")
        .body(Body::empty())?;

    let (status, body) = common::send(common::router(), request).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authorization header must use Bearer token format");
    Ok(())
}

#[tokio::test]
async fn whoami_reports_scope_from_token() -> Result<()> {
    let token = common::token_for(
        "17",
        ScopeUser::default().with_scope_type("center_admin").with_scope_center_id(9),
    );

    let (status, body) = common::get(common::router(), "/api/auth/whoami", Some(&token)).await?;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["id"], "17");
    assert_eq!(data["name"], "Admin 17");
    assert_eq!(data["is_system_scope"], false);
    assert_eq!(data["scope"], "center");
    assert_eq!(data["center"]["kind"], "center");
    assert_eq!(data["center"]["center_id"], "9");
    assert!(data["expires_at"].is_string());
    Ok(())
}

#[tokio::test]
async fn whoami_super_admin_is_system_scope() -> Result<()> {
    let token = common::token_for(
        "1",
        ScopeUser::default()
            .with_super_admin(true)
            .with_scope_type("center")
            .with_center_id(5),
    );

    let (_, body) = common::get(common::router(), "/api/auth/whoami", Some(&token)).await?;
    assert_eq!(body["data"]["is_system_scope"], true);
    assert_eq!(body["data"]["center"]["kind"], "system");
    Ok(())
}
