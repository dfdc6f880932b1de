//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    CityService, CityServiceImpl, CountryService, CountryServiceImpl,
};
use crate::config::Settings;
use crate::domain::{CityRepository, CountryRepository};
use crate::infrastructure::database;
use crate::infrastructure::repositories::{PgCityRepository, PgCountryRepository};
use crate::presentation::http::{handlers::health, routes};
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub settings: Arc<Settings>,
    pub city_service: Arc<dyn CityService>,
    pub country_service: Arc<dyn CountryService>,
}

impl AppState {
    /// State backed by the PostgreSQL repositories
    pub fn new(db: PgPool, settings: Settings) -> Self {
        let city_repo = Arc::new(PgCityRepository::new(db.clone()));
        let country_repo = Arc::new(PgCountryRepository::new(db.clone()));
        Self::with_repositories(db, settings, city_repo, country_repo)
    }

    /// State over arbitrary repository implementations
    pub fn with_repositories(
        db: PgPool,
        settings: Settings,
        city_repo: Arc<dyn CityRepository>,
        country_repo: Arc<dyn CountryRepository>,
    ) -> Self {
        Self {
            db,
            settings: Arc::new(settings),
            city_service: Arc::new(CityServiceImpl::new(city_repo, country_repo.clone())),
            country_service: Arc::new(CountryServiceImpl::new(country_repo)),
        }
    }
}

/// Router with the full middleware stack
pub fn build_router(state: AppState) -> Router {
    let cors = cors::create_cors_layer(&state.settings.cors);
    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(logging::create_trace_layer())
        .layer(cors)
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        health::init_server_start();

        let db = database::create_pool(&settings.database)
            .await
            .context("Failed to connect to database")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");
        }

        let addr: SocketAddr = settings
            .server_addr()
            .parse()
            .with_context(|| format!("Invalid server address {}", settings.server_addr()))?;

        let router = build_router(AppState::new(db, settings));

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
