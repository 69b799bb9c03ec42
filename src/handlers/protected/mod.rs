// handlers/protected/mod.rs - endpoints behind jwt_auth_middleware
//
// Every handler here can rely on an `AuthUser` request extension.
pub mod auth;
pub mod scope;

pub use auth::{profile as auth_profile, whoami as auth_whoami};
pub use scope::centers as scope_centers;
