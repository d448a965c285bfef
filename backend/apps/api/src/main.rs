//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;

use anyhow::Context;
use axum::{
    Router, http,
    http::{Method, header},
};
use farm::{FarmConfig, PgFarmRepository, farm_router};
use gate::middleware::{with_required_user, with_session_gate};
use gate::presentation::GateAppState;
use gate::router::{auth_router_generic, callback_router};
use gate::{GateConfig, HttpIdentityService, IdentityServiceConfig, PgProfileDirectory};
use platform::http_client::{HttpClientConfig, build_client};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,gate=info,farm=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth service client, shared by every request
    let client = build_client(&HttpClientConfig::with_timeout(config.auth_service_timeout))?;
    let identity = HttpIdentityService::new(
        client,
        IdentityServiceConfig::new(&config.auth_service_url, &config.auth_service_anon_key),
    );

    let gate_config = if config.development {
        GateConfig::development()
    } else {
        GateConfig::default()
    }
    .with_site_url(&config.site_url);

    let gate_state = GateAppState::new(
        identity,
        PgProfileDirectory::new(pool.clone()),
        gate_config,
    );

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // JSON API: auth endpoints are public, farm endpoints need a session
    let farm_api = with_required_user(
        farm_router(PgFarmRepository::new(pool.clone()), FarmConfig::default()),
        gate_state.clone(),
    );
    let api = Router::new()
        .nest("/auth", auth_router_generic(gate_state.clone()))
        .merge(farm_api);

    // Pages: confirmation callback plus the built frontend, behind the gate
    let pages = with_session_gate(
        callback_router(gate_state.clone())
            .fallback_service(ServeDir::new(&config.static_dir).append_index_html_on_directories(true)),
        gate_state,
    );

    // Build router
    let app = Router::new()
        .nest("/api", api)
        .merge(pages)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!(
        addr = %config.bind_addr,
        development = config.development,
        static_dir = %config.static_dir.display(),
        "Listening"
    );

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
