use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{verify_token, Claims};
use crate::error::ApiError;
use crate::scope::ScopeUser;
use crate::state::AppState;

/// Authenticated admin context extracted from the bearer JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub claims: Claims,
    /// Raw bearer token, forwarded when the profile is fetched from the platform.
    pub token: String,
}

impl AuthUser {
    pub fn scope(&self) -> &ScopeUser {
        &self.claims.scope
    }
}

/// JWT authentication middleware that validates tokens and injects [`AuthUser`]
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&headers).map_err(|msg| {
        tracing::debug!("rejecting request without usable bearer token: {}", msg);
        ApiError::unauthorized(msg)
    })?;

    let claims = verify_token(&token, &state.jwt_secret)?;
    tracing::debug!(sub = %claims.sub, "authenticated admin session");

    request.extensions_mut().insert(AuthUser { claims, token });

    Ok(next.run(request).await)
}

/// Extract JWT token from Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if token.trim().is_empty() => Err("Empty JWT token".to_string()),
        Some(token) => Ok(token.trim().to_string()),
        None => Err("Authorization header must use Bearer token format".to_string()),
    }
}
