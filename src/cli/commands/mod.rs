pub mod auth;
pub mod resolve;
pub mod server;
pub mod token;
