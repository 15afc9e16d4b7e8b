//! Admin users HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use routes::user_routes;
