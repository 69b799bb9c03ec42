use serde::Serialize;

use super::error::ScopeError;
use super::resolver::resolve_scope;
use super::user::{Identifier, ScopeUser};

/// Which centers a user's list and dashboard queries may reach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "center_id", rename_all = "snake_case")]
pub enum CenterScope {
    /// Every center.
    System,
    /// Exactly one center.
    Center(Identifier),
    /// Center-scoped, but neither center field carries an id.
    Unassigned,
}

impl CenterScope {
    pub fn for_user(user: Option<&ScopeUser>, fallback_is_system_scope: bool) -> Self {
        if resolve_scope(user, fallback_is_system_scope) {
            return CenterScope::System;
        }

        user.and_then(|u| {
            [u.scope_center_id.as_ref(), u.center_id.as_ref()]
                .into_iter()
                .flatten()
                .find(|id| id.is_present())
                .cloned()
        })
        .map(CenterScope::Center)
        .unwrap_or(CenterScope::Unassigned)
    }

    /// Center restriction to apply for a query that asked for `requested`.
    ///
    /// `Ok(None)` means no restriction.
    pub fn effective_filter(&self, requested: Option<&Identifier>) -> Result<Option<Identifier>, ScopeError> {
        let requested = requested.filter(|id| id.is_present());

        match self {
            CenterScope::System => Ok(requested.map(|id| Identifier::from(id.trimmed()))),
            CenterScope::Center(assigned) => match requested {
                None => Ok(Some(assigned.clone())),
                Some(id) if id.same_center(assigned) => Ok(Some(assigned.clone())),
                Some(id) => {
                    tracing::warn!(requested = %id, assigned = %assigned, "center filter outside user scope");
                    Err(ScopeError::CenterMismatch {
                        requested: id.trimmed().to_string(),
                        assigned: assigned.trimmed().to_string(),
                    })
                }
            },
            CenterScope::Unassigned => Err(ScopeError::NoCenterAssigned),
        }
    }
}
