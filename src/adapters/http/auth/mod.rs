//! Auth HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use dto::UserResponse;
pub use routes::auth_routes;
