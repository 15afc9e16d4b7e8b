//! FlexBit API server binary.
//!
//! Wires configuration, database pools, adapters and the HTTP router,
//! then serves until shutdown. The stock import scheduler runs as a
//! background task when enabled.

use std::sync::Arc;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::mysql::MySqlPoolOptions;
use sqlx::postgres::PgPoolOptions;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use flexbit_api::adapters::auth::{Argon2PasswordHasher, JwtTokenService};
use flexbit_api::adapters::email::ResendMailer;
use flexbit_api::adapters::http::{api_router, middleware, AppState};
use flexbit_api::adapters::midtrans::MidtransGateway;
use flexbit_api::adapters::mysql::MySqlStockImportSource;
use flexbit_api::adapters::postgres::{
    PostgresFaqRepository, PostgresNewsRepository, PostgresOrderRepository,
    PostgresStockRepository, PostgresUserRepository, PostgresWatchlistRepository,
    PostgresWikiRepository,
};
use flexbit_api::adapters::rate_limiter::InMemoryRateLimiter;
use flexbit_api::config::AppConfig;
use flexbit_api::jobs::{spawn_daily, StockImportJob};
use flexbit_api::ports::RateLimiter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    // Application store
    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Adapters
    let state = AppState {
        users: Arc::new(PostgresUserRepository::new(pool.clone())),
        orders: Arc::new(PostgresOrderRepository::new(pool.clone())),
        stocks: Arc::new(PostgresStockRepository::new(pool.clone())),
        watchlists: Arc::new(PostgresWatchlistRepository::new(pool.clone())),
        faqs: Arc::new(PostgresFaqRepository::new(pool.clone())),
        news: Arc::new(PostgresNewsRepository::new(pool.clone())),
        wikis: Arc::new(PostgresWikiRepository::new(pool.clone())),
        gateway: Arc::new(MidtransGateway::new(&config.payment)),
        hasher: Arc::new(Argon2PasswordHasher),
        tokens: Arc::new(JwtTokenService::new(
            &config.auth.jwt_secret,
            config.auth.token_ttl(),
        )),
        mailer: Arc::new(ResendMailer::new(&config.email)),
        midtrans_server_key: config.payment.midtrans_server_key.expose_secret().clone(),
        environment: config.server.environment.clone(),
        client_url: config.server.client_url.clone(),
        reset_token_ttl: config.auth.reset_token_ttl(),
    };

    // Stock import scheduler
    if config.import.enabled {
        let source_pool = MySqlPoolOptions::new()
            .max_connections(2)
            .connect(&config.import.source_url)
            .await?;
        let job = Arc::new(StockImportJob::new(
            Arc::new(MySqlStockImportSource::new(source_pool)),
            state.stocks.clone(),
        ));
        spawn_daily(job, config.import.clone());
    } else {
        tracing::info!("Stock import scheduler disabled");
    }

    // Router + layers
    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(
        config.server.rate_limit_max_requests,
        Duration::from_secs(config.server.rate_limit_window_secs),
    ));

    let origins = config.server.cors_origins_list();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins.iter().filter_map(|o| o.parse().ok()))
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api_router(state)
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            middleware::rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "FlexBit API listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
