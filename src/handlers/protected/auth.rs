use axum::extract::{Extension, State};
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::handlers::ScopeView;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::profile::AdminProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WhoamiResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub roles: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub scope: ScopeView,
}

/// GET /api/auth/whoami - identity and scope straight from the session token
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<WhoamiResponse> {
    let claims = &auth.claims;
    let scope = ScopeView::resolve(Some(auth.scope()), state.fallback_is_system_scope);

    Ok(ApiResponse::success(WhoamiResponse {
        id: claims.sub.clone(),
        name: claims.name.clone(),
        email: claims.email.clone(),
        roles: claims.roles.clone(),
        expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
        scope,
    }))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<AdminProfile>,
    #[serde(flatten)]
    pub scope: ScopeView,
}

/// GET /api/auth/profile - current profile from the platform, with its scope
///
/// When the platform has no profile for the session, scope resolves from the
/// configured fallback and `profile` is `null`.
pub async fn profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ApiResult<ProfileResponse> {
    let profile = state.profile_source()?.fetch(&auth.token).await?;

    if profile.is_none() {
        tracing::info!(sub = %auth.claims.sub, "platform has no profile for session, using scope fallback");
    }

    let scope = ScopeView::resolve(profile.as_ref().map(|p| &p.scope), state.fallback_is_system_scope);

    Ok(ApiResponse::success(ProfileResponse { profile, scope }))
}
