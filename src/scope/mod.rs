pub mod center;
pub mod error;
pub mod resolver;
pub mod user;

pub use center::CenterScope;
pub use error::ScopeError;
pub use resolver::{has_identifier, is_system_scope_user, normalize_scope_type, resolve_scope, ScopeKind};
pub use user::{Identifier, ScopeText, ScopeUser};
