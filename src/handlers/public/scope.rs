use axum::extract::{rejection::JsonRejection, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::handlers::ScopeView;
use crate::middleware::{ApiResponse, ApiResult};
use crate::scope::ScopeUser;

#[derive(Debug, Deserialize)]
pub struct ResolveRequest {
    /// Any JSON value; falsy values mean "no user".
    #[serde(default)]
    pub user: Value,
    #[serde(default)]
    pub fallback: bool,
}

/// POST /api/scope/resolve - classify an arbitrary user record
///
/// ```json
/// { "user": { "scope_type": "center_admin", "scope_center_id": 9 }, "fallback": false }
/// ```
pub async fn resolve(body: Result<Json<ResolveRequest>, JsonRejection>) -> ApiResult<ScopeView> {
    let Json(request) = body.map_err(ApiError::from)?;

    let user = ScopeUser::from_json(&request.user);
    Ok(ApiResponse::success(ScopeView::resolve(user.as_ref(), request.fallback)))
}
