//! Stocks HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use routes::stock_routes;
