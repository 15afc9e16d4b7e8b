//! Payment HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use routes::payment_routes;
