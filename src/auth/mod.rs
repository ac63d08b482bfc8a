pub mod auth;
pub mod handlers;
pub mod jwt;
pub mod middleware;
pub mod password;

/// Name of the cookie carrying the signed session token.
pub const SESSION_COOKIE: &str = "session";
