use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use http::{header::CONTENT_TYPE, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use magazine_subscriptions::adapters::http::{api_router, AppState};
use magazine_subscriptions::adapters::memory::{InMemoryLedgerStore, InMemoryMagazineRepository};
use magazine_subscriptions::adapters::portone::PortOneGateway;
use magazine_subscriptions::adapters::postgres::{PostgresLedgerStore, PostgresMagazineRepository};
use magazine_subscriptions::adapters::postgrest::{
    PostgrestClient, PostgrestConfig, PostgrestLedgerStore, PostgrestMagazineRepository,
};
use magazine_subscriptions::config::{AppConfig, ServerConfig, StorageBackend};
use magazine_subscriptions::ports::{LedgerStore, MagazineRepository};
use magazine_subscriptions::telemetry;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        error!("Server exited with error: {:#}", err);
        eprintln!("Server exited with error: {:#}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::load().context("loading configuration")?;
    telemetry::init_tracing(&config.server).context("installing tracing subscriber")?;
    config.validate().context("validating configuration")?;
    info!(
        environment = ?config.server.environment,
        backend = ?config.storage.backend,
        "Configuration loaded"
    );

    if !config.portone.has_secret() {
        warn!("PortOne API secret is not set; gateway-backed endpoints will answer 500");
    }

    let (ledger, magazines) = build_storage(&config).await?;
    let gateway = Arc::new(PortOneGateway::new(config.portone.to_adapter_config()));
    let state = AppState::new(gateway, ledger, magazines);

    let app = with_middleware(api_router(state), &config.server)?;

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn build_storage(
    config: &AppConfig,
) -> Result<(Arc<dyn LedgerStore>, Arc<dyn MagazineRepository>)> {
    match config.storage.backend {
        StorageBackend::Postgres => {
            let db = &config.database;
            let pool = PgPoolOptions::new()
                .min_connections(db.min_connections)
                .max_connections(db.max_connections)
                .acquire_timeout(db.acquire_timeout())
                .idle_timeout(db.idle_timeout())
                .max_lifetime(db.max_lifetime())
                .connect(&db.url)
                .await
                .context("connecting to PostgreSQL")?;
            info!("PostgreSQL pool established");

            if db.run_migrations {
                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .context("running migrations")?;
                info!("Migrations applied");
            }

            let ledger: Arc<dyn LedgerStore> = Arc::new(PostgresLedgerStore::new(pool.clone()));
            let magazines: Arc<dyn MagazineRepository> =
                Arc::new(PostgresMagazineRepository::new(pool));
            Ok((ledger, magazines))
        }
        StorageBackend::Postgrest => {
            let client = PostgrestClient::new(PostgrestConfig::new(
                config.postgrest.url.clone(),
                config.postgrest.access_key.clone(),
            ));
            let ledger: Arc<dyn LedgerStore> = Arc::new(PostgrestLedgerStore::new(client.clone()));
            let magazines: Arc<dyn MagazineRepository> =
                Arc::new(PostgrestMagazineRepository::new(client));
            Ok((ledger, magazines))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            let ledger: Arc<dyn LedgerStore> = Arc::new(InMemoryLedgerStore::new());
            let magazines: Arc<dyn MagazineRepository> =
                Arc::new(InMemoryMagazineRepository::new());
            Ok((ledger, magazines))
        }
    }
}

fn with_middleware(router: Router, server: &ServerConfig) -> Result<Router> {
    let origins = server.cors_origins_list();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);
    let cors = if origins.is_empty() {
        cors.allow_origin(Any)
    } else {
        let origins = origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid CORS origin {}", o)))
            .collect::<Result<Vec<_>>>()?;
        cors.allow_origin(origins)
    };

    Ok(router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(TimeoutLayer::new(server.request_timeout())),
    ))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C, shutting down"),
        Err(err) => {
            error!(error = %err, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
