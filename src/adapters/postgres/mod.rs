//! PostgreSQL adapters - repository implementations over sqlx.

mod content_repository;
mod order_repository;
mod stock_repository;
mod user_repository;
mod watchlist_repository;

pub use content_repository::{PostgresFaqRepository, PostgresNewsRepository, PostgresWikiRepository};
pub use order_repository::PostgresOrderRepository;
pub use stock_repository::PostgresStockRepository;
pub use user_repository::PostgresUserRepository;
pub use watchlist_repository::PostgresWatchlistRepository;
