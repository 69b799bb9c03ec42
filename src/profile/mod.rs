use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::UpstreamConfig;
use crate::scope::user::coerce_to_text;
use crate::scope::ScopeUser;

/// Admin profile as returned by the platform's "current user" endpoint.
///
/// Scope signals are flattened in from [`ScopeUser`]; everything else the
/// platform sends beyond these fields is dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminProfile {
    #[serde(deserialize_with = "id_text")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_name")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_email")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub roles: Vec<String>,
    #[serde(default, deserialize_with = "lenient_names")]
    pub permissions: Vec<String>,
    #[serde(flatten)]
    pub scope: ScopeUser,
}

fn id_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("invalid profile id: {other}"))),
    }
}

fn lenient_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_to_text(&value).unwrap_or_default())
}

fn lenient_email<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) if !s.trim().is_empty() => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Role/permission lists: plain names, or objects carrying a `name`; anything else is skipped.
fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Object(mut map) => match map.remove("name") {
                Some(Value::String(s)) => Some(s),
                _ => None,
            },
            _ => None,
        })
        .collect())
}

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("Profile source is not configured")]
    NotConfigured,

    #[error("Upstream rejected the session token")]
    Rejected,

    #[error("Upstream request failed: {0}")]
    Upstream(String),

    #[error("Invalid profile payload: {0}")]
    InvalidPayload(String),
}

/// Where the admin profile for a session token comes from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// `Ok(None)` when the source knows of no profile for this token.
    async fn fetch(&self, bearer_token: &str) -> Result<Option<AdminProfile>, ProfileError>;
}

/// Profiles fetched from the platform API with the caller's bearer token.
pub struct HttpProfileSource {
    client: reqwest::Client,
    profile_url: url::Url,
}

impl HttpProfileSource {
    pub fn new(base_url: &str, profile_path: &str, timeout: Duration) -> Result<Self, ProfileError> {
        let base = url::Url::parse(base_url)
            .map_err(|e| ProfileError::Upstream(format!("invalid base url '{}': {}", base_url, e)))?;
        let profile_url = base
            .join(profile_path)
            .map_err(|e| ProfileError::Upstream(format!("invalid profile path '{}': {}", profile_path, e)))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProfileError::Upstream(e.to_string()))?;

        Ok(Self { client, profile_url })
    }

    /// Build from config; `Ok(None)` when no upstream base URL is set.
    pub fn from_config(config: &UpstreamConfig) -> Result<Option<Self>, ProfileError> {
        match config.base_url.as_deref() {
            Some(base_url) => Self::new(base_url, &config.profile_path, Duration::from_secs(config.timeout_secs)).map(Some),
            None => Ok(None),
        }
    }

    pub fn profile_url(&self) -> &url::Url {
        &self.profile_url
    }
}

#[async_trait]
impl ProfileSource for HttpProfileSource {
    async fn fetch(&self, bearer_token: &str) -> Result<Option<AdminProfile>, ProfileError> {
        let response = self
            .client
            .get(self.profile_url.clone())
            .bearer_auth(bearer_token)
            .send()
            .await
            .map_err(|e| ProfileError::Upstream(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(ProfileError::Rejected);
        }
        if !status.is_success() {
            return Err(ProfileError::Upstream(format!("profile endpoint returned {}", status)));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| ProfileError::InvalidPayload(e.to_string()))?;

        parse_profile(body)
    }
}

/// Accepts a bare profile object or the platform envelope `{ "data": { ... } }`.
/// A `null` profile (bare or enveloped) means there is no profile.
pub fn parse_profile(body: Value) -> Result<Option<AdminProfile>, ProfileError> {
    let profile = match body {
        Value::Object(mut map) if !map.contains_key("id") && map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };

    if profile.is_null() {
        return Ok(None);
    }

    serde_json::from_value(profile)
        .map(Some)
        .map_err(|e| ProfileError::InvalidPayload(e.to_string()))
}

/// Fixed token-to-profile table, for local runs and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticProfileSource {
    profiles: HashMap<String, AdminProfile>,
}

impl StaticProfileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(mut self, token: impl Into<String>, profile: AdminProfile) -> Self {
        self.profiles.insert(token.into(), profile);
        self
    }
}

#[async_trait]
impl ProfileSource for StaticProfileSource {
    async fn fetch(&self, bearer_token: &str) -> Result<Option<AdminProfile>, ProfileError> {
        Ok(self.profiles.get(bearer_token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_enveloped_profile_ignores_extra_fields() {
        let profile = parse_profile(json!({
            "success": true,
            "data": {
                "id": 7,
                "name": "Dana",
                "email": "dana@example.com",
                "roles": ["center_admin"],
                "scope_type": "center_admin",
                "scope_center_id": 3,
                "avatar_url": "https://cdn.example.com/a.png",
                "last_login_at": "2025-01-01T00:00:00Z"
            }
        }))
        .unwrap()
        .unwrap();

        assert_eq!(profile.id, "7");
        assert_eq!(profile.roles, vec!["center_admin".to_string()]);
        assert_eq!(profile.scope.scope_center_id.unwrap().as_str(), "3");
        assert!(profile.permissions.is_empty());
    }

    #[test]
    fn test_parse_bare_profile() {
        let profile = parse_profile(json!({ "id": "u-1", "name": "Root", "is_system_super_admin": true }))
            .unwrap()
            .unwrap();
        assert_eq!(profile.scope.is_system_super_admin, Some(true));
    }

    #[test]
    fn test_parse_profile_tolerates_null_and_odd_fields() {
        let profile = parse_profile(json!({
            "id": 1,
            "name": null,
            "email": 42,
            "roles": null,
            "permissions": ["courses.view", { "name": "videos.edit" }, 7],
            "scope_type": "center_admin",
            "center_id": 3
        }))
        .unwrap()
        .unwrap();

        assert_eq!(profile.name, "");
        assert_eq!(profile.email, None);
        assert!(profile.roles.is_empty());
        assert_eq!(profile.permissions, vec!["courses.view".to_string(), "videos.edit".to_string()]);
        assert!(!crate::scope::resolve_scope(Some(&profile.scope), true));
    }

    #[test]
    fn test_parse_null_profile() {
        assert!(parse_profile(json!(null)).unwrap().is_none());
        assert!(parse_profile(json!({ "data": null })).unwrap().is_none());
    }

    #[test]
    fn test_parse_profile_without_id_is_invalid() {
        assert!(matches!(
            parse_profile(json!({ "name": "nobody" })),
            Err(ProfileError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_http_source_joins_profile_path() {
        let source = HttpProfileSource::new("https://lms.example.com", "/api/v1/admin/auth/me", Duration::from_secs(1)).unwrap();
        assert_eq!(source.profile_url().as_str(), "https://lms.example.com/api/v1/admin/auth/me");
    }

    #[test]
    fn test_http_source_disabled_without_base_url() {
        let config = UpstreamConfig {
            base_url: None,
            profile_path: "/me".to_string(),
            timeout_secs: 1,
        };
        assert!(HttpProfileSource::from_config(&config).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_static_source_lookup() {
        let profile = AdminProfile {
            id: "1".to_string(),
            name: "Root".to_string(),
            email: None,
            roles: vec![],
            permissions: vec![],
            scope: ScopeUser::default().with_super_admin(true),
        };
        let source = StaticProfileSource::new().with_profile("tok", profile.clone());

        assert_eq!(source.fetch("tok").await.unwrap(), Some(profile));
        assert_eq!(source.fetch("other").await.unwrap(), None);
    }
}
