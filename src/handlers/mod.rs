// handlers/mod.rs - two security tiers
//
// Public (no auth) → Protected (bearer JWT via middleware::jwt_auth_middleware)
pub mod protected;
pub mod public;

use serde::Serialize;

use crate::scope::{resolve_scope, CenterScope, ScopeKind, ScopeUser};

/// Scope decision as reported by every scope-aware endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScopeView {
    pub is_system_scope: bool,
    pub scope: ScopeKind,
    pub center: CenterScope,
}

impl ScopeView {
    pub fn resolve(user: Option<&ScopeUser>, fallback_is_system_scope: bool) -> Self {
        let is_system_scope = resolve_scope(user, fallback_is_system_scope);
        Self {
            is_system_scope,
            scope: ScopeKind::from(is_system_scope),
            center: CenterScope::for_user(user, fallback_is_system_scope),
        }
    }
}
