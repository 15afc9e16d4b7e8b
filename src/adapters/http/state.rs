//! Shared application state for HTTP handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::application::handlers::auth::{
    ChangePasswordHandler, LoginUserHandler, RegisterUserHandler, RequestPasswordResetHandler,
    ResetPasswordHandler, UpdateProfileHandler,
};
use crate::application::handlers::content::{ListFaqsHandler, ListNewsHandler, ListWikisHandler};
use crate::application::handlers::export::{ExportStocksHandler, ExportWatchlistHandler};
use crate::application::handlers::payment::{
    CreateOrderHandler, PaymentHistoryHandler, ProcessNotificationHandler, ReconcileOrderHandler,
    VerifyOrderHandler,
};
use crate::application::handlers::stocks::{
    GetStockHandler, GetStockStatsHandler, ListStocksHandler, ScreenStocksHandler,
};
use crate::application::handlers::users::{DeleteUserHandler, ListUsersHandler, UpdateUserHandler};
use crate::application::handlers::watchlist as watchlist_handlers;
use crate::config::Environment;
use crate::domain::payment::NotificationVerifier;
use crate::ports::{
    FaqRepository, Mailer, NewsRepository, OrderRepository, PasswordHasher, PaymentGateway,
    StockRepository, TokenService, UserRepository, WatchlistRepository, WikiRepository,
};

/// Shared application state containing all port implementations.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub stocks: Arc<dyn StockRepository>,
    pub watchlists: Arc<dyn WatchlistRepository>,
    pub faqs: Arc<dyn FaqRepository>,
    pub news: Arc<dyn NewsRepository>,
    pub wikis: Arc<dyn WikiRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub mailer: Arc<dyn Mailer>,

    /// Midtrans server key; the webhook verifier is rebuilt from it.
    pub midtrans_server_key: String,
    pub environment: Environment,
    pub client_url: String,
    pub reset_token_ttl: Duration,
}

impl AppState {
    // Handlers are built on demand from the shared ports.

    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn login_handler(&self) -> LoginUserHandler {
        LoginUserHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn update_profile_handler(&self) -> UpdateProfileHandler {
        UpdateProfileHandler::new(self.users.clone())
    }

    pub fn change_password_handler(&self) -> ChangePasswordHandler {
        ChangePasswordHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn request_password_reset_handler(&self) -> RequestPasswordResetHandler {
        RequestPasswordResetHandler::new(
            self.users.clone(),
            self.mailer.clone(),
            self.client_url.clone(),
            self.reset_token_ttl,
        )
    }

    pub fn reset_password_handler(&self) -> ResetPasswordHandler {
        ResetPasswordHandler::new(self.users.clone(), self.hasher.clone())
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.orders.clone(), self.gateway.clone())
    }

    pub fn reconcile_handler(&self) -> ReconcileOrderHandler {
        ReconcileOrderHandler::new(self.orders.clone(), self.users.clone())
    }

    pub fn process_notification_handler(&self) -> ProcessNotificationHandler {
        ProcessNotificationHandler::new(
            NotificationVerifier::new(self.midtrans_server_key.clone()),
            self.gateway.clone(),
            self.reconcile_handler(),
        )
    }

    pub fn verify_order_handler(&self) -> VerifyOrderHandler {
        VerifyOrderHandler::new(
            self.orders.clone(),
            self.gateway.clone(),
            self.reconcile_handler(),
        )
    }

    pub fn payment_history_handler(&self) -> PaymentHistoryHandler {
        PaymentHistoryHandler::new(self.orders.clone())
    }

    pub fn list_stocks_handler(&self) -> ListStocksHandler {
        ListStocksHandler::new(self.stocks.clone())
    }

    pub fn get_stock_handler(&self) -> GetStockHandler {
        GetStockHandler::new(self.stocks.clone())
    }

    pub fn screen_stocks_handler(&self) -> ScreenStocksHandler {
        ScreenStocksHandler::new(self.stocks.clone())
    }

    pub fn stock_stats_handler(&self) -> GetStockStatsHandler {
        GetStockStatsHandler::new(self.stocks.clone())
    }

    pub fn get_watchlist_handler(&self) -> watchlist_handlers::GetWatchlistHandler {
        watchlist_handlers::GetWatchlistHandler::new(self.watchlists.clone(), self.stocks.clone())
    }

    pub fn add_stock_handler(&self) -> watchlist_handlers::AddStockHandler {
        watchlist_handlers::AddStockHandler::new(self.watchlists.clone(), self.stocks.clone())
    }

    pub fn remove_stock_handler(&self) -> watchlist_handlers::RemoveStockHandler {
        watchlist_handlers::RemoveStockHandler::new(self.watchlists.clone())
    }

    pub fn configure_alert_handler(&self) -> watchlist_handlers::ConfigureAlertHandler {
        watchlist_handlers::ConfigureAlertHandler::new(self.watchlists.clone())
    }

    pub fn export_stocks_handler(&self) -> ExportStocksHandler {
        ExportStocksHandler::new(self.stocks.clone())
    }

    pub fn export_watchlist_handler(&self) -> ExportWatchlistHandler {
        ExportWatchlistHandler::new(self.watchlists.clone(), self.stocks.clone())
    }

    pub fn list_users_handler(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone())
    }

    pub fn update_user_handler(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone())
    }

    pub fn delete_user_handler(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(self.users.clone(), self.watchlists.clone())
    }

    pub fn list_faqs_handler(&self) -> ListFaqsHandler {
        ListFaqsHandler::new(self.faqs.clone())
    }

    pub fn list_news_handler(&self) -> ListNewsHandler {
        ListNewsHandler::new(self.news.clone())
    }

    pub fn list_wikis_handler(&self) -> ListWikisHandler {
        ListWikisHandler::new(self.wikis.clone())
    }

    /// True when manual verification must be disabled.
    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}
