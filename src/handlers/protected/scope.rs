use axum::extract::{Extension, Query, State};
use serde::{Deserialize, Serialize};

use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::scope::{CenterScope, Identifier, ScopeKind};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CentersQuery {
    pub center_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CenterFilterResponse {
    pub scope: ScopeKind,
    /// Center every list query must be restricted to; `null` means all centers.
    pub center_id: Option<Identifier>,
    pub all_centers: bool,
}

/// GET /api/scope/centers?center_id= - effective center filter for the session
pub async fn centers(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<CentersQuery>,
) -> ApiResult<CenterFilterResponse> {
    let center_scope = CenterScope::for_user(Some(auth.scope()), state.fallback_is_system_scope);
    let requested = query.center_id.map(Identifier::from);
    let center_id = center_scope.effective_filter(requested.as_ref())?;

    let scope = match center_scope {
        CenterScope::System => ScopeKind::System,
        _ => ScopeKind::Center,
    };

    Ok(ApiResponse::success(CenterFilterResponse {
        scope,
        all_centers: center_id.is_none(),
        center_id,
    }))
}
