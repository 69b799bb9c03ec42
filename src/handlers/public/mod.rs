// handlers/public/mod.rs - endpoints that need no bearer token
pub mod scope;
pub mod status;

pub use scope::resolve as scope_resolve;
pub use status::{health, root};
