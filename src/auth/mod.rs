use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::scope::ScopeUser;

/// Session token claims. The scope signals ride along so scope checks
/// do not need a profile round-trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(flatten)]
    pub scope: ScopeUser,
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, name: impl Into<String>, scope: ScopeUser) -> Self {
        Self::with_expiry(sub, name, scope, config::config().security.jwt_expiry_hours)
    }

    pub fn with_expiry(
        sub: impl Into<String>,
        name: impl Into<String>,
        scope: ScopeUser,
        expiry_hours: u64,
    ) -> Self {
        let now = Utc::now();
        // Out-of-range lifetimes saturate instead of overflowing into the past
        let exp = i64::try_from(expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
            .timestamp();

        Self {
            sub: sub.into(),
            name: name.into(),
            email: None,
            roles: Vec::new(),
            scope,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Invalid JWT token: {0}")]
    InvalidToken(String),
}

pub fn issue_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key).map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| JwtError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Issue a token with the configured secret.
pub fn generate_jwt(claims: &Claims) -> Result<String, JwtError> {
    issue_token(claims, &config::config().security.jwt_secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn test_token_carries_scope_signals() {
        let scope = ScopeUser::default().with_scope_type("center_admin").with_scope_center_id(9);
        let claims = Claims::with_expiry("42", "Center Admin", scope.clone(), 1).with_email("c@example.com");

        let token = issue_token(&claims, SECRET).unwrap();
        let decoded = verify_token(&token, SECRET).unwrap();

        assert_eq!(decoded.scope, scope);
        assert_eq!(decoded.sub, "42");
        assert_eq!(decoded.email.as_deref(), Some("c@example.com"));
    }

    #[test]
    fn test_huge_expiry_saturates_into_the_future() {
        let now = Utc::now().timestamp();
        for hours in [u64::MAX, i64::MAX as u64, 1 << 40] {
            let claims = Claims::with_expiry("1", "Admin", ScopeUser::default(), hours);
            assert!(claims.exp > now, "{hours} hours produced exp {}", claims.exp);
        }

        let claims = Claims::with_expiry("1", "Admin", ScopeUser::default(), u64::MAX);
        let token = issue_token(&claims, SECRET).unwrap();
        assert!(verify_token(&token, SECRET).is_ok());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let claims = Claims::with_expiry("1", "Admin", ScopeUser::default(), 1);
        let token = issue_token(&claims, SECRET).unwrap();
        assert!(matches!(verify_token(&token, "other"), Err(JwtError::InvalidToken(_))));
    }

    #[test]
    fn test_empty_secret_is_refused() {
        let claims = Claims::with_expiry("1", "Admin", ScopeUser::default(), 1);
        assert!(matches!(issue_token(&claims, ""), Err(JwtError::MissingSecret)));
        assert!(matches!(verify_token("a.b.c", ""), Err(JwtError::MissingSecret)));
    }
}
