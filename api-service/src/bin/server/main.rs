use std::sync::Arc;

use anyhow::Context;
use api_service::config::Config;
use api_service::domain::product::ports::ProductServicePort;
use api_service::domain::product::service::ProductService;
use api_service::domain::user::ports::UserServicePort;
use api_service::domain::user::service::UserService;
use api_service::inbound::http::router::create_router;
use api_service::inbound::http::router::AppState;
use api_service::outbound::repositories::InMemoryProductRepository;
use api_service::outbound::repositories::InMemoryUserRepository;
use api_service::outbound::repositories::PostgresProductRepository;
use api_service::outbound::repositories::PostgresUserRepository;
use api_service::outbound::weather::OpenWeatherMapClient;
use auth::Authenticator;
use auth::TokenService;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "api-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = if config.database.url.is_some() { "postgresql" } else { "memory" },
        token_ttl_hours = config.jwt.expiration_hours,
        weather_configured = config.weather.api_key.is_some(),
        "Configuration loaded"
    );

    let password_hasher = config.password.build_hasher()?;
    let token_ttl = chrono::Duration::try_hours(config.jwt.expiration_hours)
        .filter(|ttl| *ttl > chrono::Duration::zero())
        .context("jwt.expiration_hours must be a positive number of hours")?;
    let token_service = TokenService::new(config.jwt.secret.as_bytes(), token_ttl)?;
    let authenticator = Arc::new(Authenticator::with_hasher(
        password_hasher.clone(),
        token_service,
    ));

    let (user_service, product_service): (Arc<dyn UserServicePort>, Arc<dyn ProductServicePort>) =
        match &config.database.url {
            Some(url) => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(config.database.max_connections)
                    .connect(url)
                    .await?;
                tracing::info!(
                    max_connections = config.database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                (
                    Arc::new(UserService::new(
                        Arc::new(PostgresUserRepository::new(pg_pool.clone())),
                        password_hasher,
                    )),
                    Arc::new(ProductService::new(Arc::new(
                        PostgresProductRepository::new(pg_pool),
                    ))),
                )
            }
            None => {
                tracing::warn!("No database configured, data is kept in memory only");
                (
                    Arc::new(UserService::new(
                        Arc::new(InMemoryUserRepository::new()),
                        password_hasher,
                    )),
                    Arc::new(ProductService::new(Arc::new(
                        InMemoryProductRepository::new(),
                    ))),
                )
            }
        };

    if config.weather.api_key.is_none() {
        tracing::warn!("No weather API key configured, weather lookups will fail");
    }
    let weather_provider = Arc::new(OpenWeatherMapClient::new(&config.weather)?);

    let state = AppState {
        user_service,
        product_service,
        weather_provider,
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    tracing::info!("Server exited");

    Ok(())
}
