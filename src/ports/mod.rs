//! Ports - async trait contracts between the application core and the
//! outside world. Adapters implement these; handlers depend on them.

mod auth;
mod content_repository;
mod import_source;
mod mailer;
mod order_repository;
mod payment_gateway;
mod rate_limiter;
mod stock_repository;
mod user_repository;
mod watchlist_repository;

pub use auth::{AuthError, PasswordHasher, TokenService};
pub use content_repository::{FaqRepository, NewsPage, NewsRepository, WikiRepository};
pub use import_source::StockImportSource;
pub use mailer::{EmailMessage, Mailer};
pub use order_repository::OrderRepository;
pub use payment_gateway::{CheckoutRequest, CheckoutSession, GatewayError, PaymentGateway};
pub use rate_limiter::{RateLimitDecision, RateLimiter};
pub use stock_repository::{
    ConflictCounts, QualityCounts, ScreenerQuery, StockPage, StockQuery, StockRepository,
    StockSort, StockStats, TimingCounts,
};
pub use user_repository::UserRepository;
pub use watchlist_repository::WatchlistRepository;
