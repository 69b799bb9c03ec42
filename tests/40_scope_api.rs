mod common;

use anyhow::Result;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use lms_admin_api::scope::ScopeUser;
use serde_json::json;

#[tokio::test]
async fn resolve_endpoint_classifies_user_records() -> Result<()> {
    let (status, body) = common::post_json(
        common::router(),
        "/api/scope/resolve",
        &json!({ "user": { "scope_type": "center_admin", "scope_center_id": 9 } }),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_system_scope"], false);
    assert_eq!(body["data"]["scope"], "center");
    assert_eq!(body["data"]["center"]["center_id"], "9");
    Ok(())
}

#[tokio::test]
async fn resolve_endpoint_honours_fallback_for_missing_user() -> Result<()> {
    let (_, with_fallback) =
        common::post_json(common::router(), "/api/scope/resolve", &json!({ "user": null, "fallback": true })).await?;
    let (_, default_fallback) = common::post_json(common::router(), "/api/scope/resolve", &json!({})).await?;

    assert_eq!(with_fallback["data"]["is_system_scope"], true);
    assert_eq!(default_fallback["data"]["is_system_scope"], false);
    Ok(())
}

#[tokio::test]
async fn resolve_endpoint_rejects_malformed_json() -> Result<()> {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/scope/resolve")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))?;

    let (status, body) = common::send(common::router(), request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");
    Ok(())
}

#[tokio::test]
async fn center_user_is_pinned_to_own_center() -> Result<()> {
    let token = common::token_for("8", ScopeUser::default().with_scope_type("center").with_center_id(12));

    let (status, body) = common::get(common::router(), "/api/scope/centers", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["center_id"], "12");
    assert_eq!(body["data"]["all_centers"], false);

    let (status, _) = common::get(common::router(), "/api/scope/centers?center_id=12", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = common::get(common::router(), "/api/scope/centers?center_id=13", Some(&token)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "FORBIDDEN");
    Ok(())
}

#[tokio::test]
async fn system_user_may_filter_any_center() -> Result<()> {
    let token = common::token_for("2", ScopeUser::default().with_scope_type("system_admin").with_center_id(1));

    let (_, all) = common::get(common::router(), "/api/scope/centers", Some(&token)).await?;
    assert_eq!(all["data"]["scope"], "system");
    assert_eq!(all["data"]["all_centers"], true);
    assert!(all["data"]["center_id"].is_null());

    let (status, one) = common::get(common::router(), "/api/scope/centers?center_id=44", Some(&token)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(one["data"]["center_id"], "44");
    Ok(())
}

#[tokio::test]
async fn center_scope_without_center_is_forbidden() -> Result<()> {
    let token = common::token_for("9", ScopeUser::default().with_scope_type("center_manager"));

    let (status, body) = common::get(common::router(), "/api/scope/centers", Some(&token)).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "User is center-scoped but has no center assigned");
    Ok(())
}
