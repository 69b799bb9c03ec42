use serde::{Deserialize, Serialize};

use super::user::{trim_padding, Identifier, ScopeText, ScopeUser};

/// Named form of a scope decision, used in API payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeKind {
    System,
    Center,
}

impl From<bool> for ScopeKind {
    fn from(is_system_scope: bool) -> Self {
        if is_system_scope {
            ScopeKind::System
        } else {
            ScopeKind::Center
        }
    }
}

impl ScopeKind {
    pub fn is_system(self) -> bool {
        matches!(self, ScopeKind::System)
    }
}

/// Decide whether `user` holds system-wide (cross-center) authority.
///
/// Rules are checked in order and the first match wins:
///
/// 1. no user: `fallback_is_system_scope`
/// 2. `is_system_super_admin == true`: system
/// 3. normalized `scope_type` contains `"system"`: system
/// 4. normalized `scope_type` contains `"center"`: center
/// 5. `scope_center_id` present: center
/// 6. `center_id` present: center
/// 7. otherwise: system
///
/// A `scope_type` of `"system"` wins over a stale `center_id` on the same record.
pub fn resolve_scope(user: Option<&ScopeUser>, fallback_is_system_scope: bool) -> bool {
    let Some(user) = user else {
        tracing::trace!(fallback_is_system_scope, "scope resolved from fallback");
        return fallback_is_system_scope;
    };

    if user.is_system_super_admin == Some(true) {
        tracing::trace!("scope resolved by super admin flag");
        return true;
    }

    let scope_type = normalize_scope_type(user.scope_type.as_ref());
    if scope_type.contains("system") {
        tracing::trace!(%scope_type, "scope resolved by scope_type");
        return true;
    }
    if scope_type.contains("center") {
        tracing::trace!(%scope_type, "scope resolved by scope_type");
        return false;
    }

    if has_identifier(user.scope_center_id.as_ref()) {
        tracing::trace!("scope resolved by scope_center_id");
        return false;
    }
    if has_identifier(user.center_id.as_ref()) {
        tracing::trace!("scope resolved by center_id");
        return false;
    }

    tracing::trace!("no center signal, defaulting to system scope");
    true
}

/// Same as [`resolve_scope`] with a center-scoped fallback for a missing user.
pub fn is_system_scope_user(user: Option<&ScopeUser>) -> bool {
    resolve_scope(user, false)
}

/// Trimmed, lowercased `scope_type`; empty when absent.
pub fn normalize_scope_type(scope_type: Option<&ScopeText>) -> String {
    scope_type
        .map(|text| trim_padding(text.as_str()).to_lowercase())
        .unwrap_or_default()
}

pub fn has_identifier(id: Option<&Identifier>) -> bool {
    id.is_some_and(Identifier::is_present)
}
