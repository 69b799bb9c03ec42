pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod profile;
pub mod scope;
pub mod state;

pub use scope::{is_system_scope_user, resolve_scope, ScopeUser};
