use std::sync::Arc;

use crate::config::AppConfig;
use crate::profile::{HttpProfileSource, ProfileError, ProfileSource};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub jwt_secret: Arc<str>,
    /// Decision for requests that resolve scope without any user record.
    pub fallback_is_system_scope: bool,
    pub profiles: Option<Arc<dyn ProfileSource>>,
}

impl AppState {
    pub fn new(jwt_secret: impl Into<Arc<str>>, fallback_is_system_scope: bool) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            fallback_is_system_scope,
            profiles: None,
        }
    }

    pub fn with_profiles(mut self, profiles: Arc<dyn ProfileSource>) -> Self {
        self.profiles = Some(profiles);
        self
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ProfileError> {
        let state = Self::new(config.security.jwt_secret.as_str(), config.scope.fallback_is_system_scope);

        match HttpProfileSource::from_config(&config.upstream)? {
            Some(source) => {
                tracing::info!("profile lookups via {}", source.profile_url());
                Ok(state.with_profiles(Arc::new(source)))
            }
            None => {
                tracing::warn!("UPSTREAM_BASE_URL not set, /api/auth/profile will be unavailable");
                Ok(state)
            }
        }
    }

    pub fn profile_source(&self) -> Result<&dyn ProfileSource, ProfileError> {
        self.profiles.as_deref().ok_or(ProfileError::NotConfigured)
    }
}
