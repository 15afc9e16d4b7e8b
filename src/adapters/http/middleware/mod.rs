//! HTTP middleware.

mod auth;
mod rate_limit;

pub use auth::{auth_middleware, RequireAdmin, RequireAuth};
pub use rate_limit::rate_limit_middleware;
