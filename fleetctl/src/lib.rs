//! # fleetctl: Fleet Equipment Registry
//!
//! `fleetctl` is a small control service for a fleet equipment
//! registry. It exposes a REST API for managing *resource types*
//! (equipment categories, each with a maximum allowed speed) and
//! *resources* (individual pieces of equipment, each with a current
//! speed and exactly one owning category), persisted in PostgreSQL.
//!
//! Every resource representation carries a derived
//! `speed_exceeding_percentage` - the percentage by which the
//! equipment's current speed exceeds its category's limit, floored at
//! zero. The metric is computed at read time from the two records and
//! is never stored.
//!
//! ## Architecture
//!
//! The application is built on [Axum](https://github.com/tokio-rs/axum)
//! for the HTTP layer and uses PostgreSQL (via SQLx) for persistence.
//!
//! A request flows through three layers: the router dispatches to a
//! handler in [`api::handlers`], which validates the parsed inputs and
//! raises taxonomy errors from [`errors`] for anything malformed; the
//! handler drives a repository from [`db::handlers`], which runs
//! parameterized statements on a request-scoped connection and
//! classifies constraint violations through [`db::errors`]; finally
//! the handler converts records into the response models in
//! [`api::models`], resolving each resource's owning type to compute
//! the derived metric. Errors from any layer converge in a single
//! `IntoResponse` implementation that writes the status code and a
//! `{"detail": ...}` JSON body.
//!
//! Requests are served concurrently; the only state shared between
//! them is the connection pool inside [`AppState`], which is read-only
//! after startup. Concurrent writes to the same row are resolved by
//! the store's row-level locking - the service imposes no additional
//! ordering, so the last write wins.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use fleetctl::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = fleetctl::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     fleetctl::telemetry::init_telemetry()?;
//!
//!     let app = Application::new(config).await?;
//!     app.serve(async {
//!         tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!     })
//!     .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Database Setup
//!
//! The application requires a PostgreSQL database and runs its
//! migrations on startup:
//!
//! ```no_run
//! # use sqlx::PgPool;
//! # async fn example(pool: PgPool) -> Result<(), sqlx::Error> {
//! fleetctl::migrator().run(&pool).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod config;
pub mod db;
pub mod errors;
mod openapi;
pub mod telemetry;
pub mod types;

#[cfg(test)]
mod test;

use axum::{Router, http::HeaderValue, response::Json, routing::get};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, debug, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

pub use config::Config;
use openapi::ApiDoc;

/// Application state shared across all request handlers.
///
/// Cloning is cheap: the pool is reference-counted and the config is
/// small. Both are read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
}

/// Get the fleetctl database migrator
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}

/// Seed the database with example resource types (run only once).
///
/// Idempotent: seeding is skipped whenever any resource type already
/// exists, so manual changes are never overwritten.
#[instrument(skip_all)]
pub async fn seed_database(db: &PgPool) -> anyhow::Result<()> {
    let mut tx = db.begin().await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resource_type")
        .fetch_one(&mut *tx)
        .await?;
    if existing > 0 {
        debug!("Database already seeded, skipping seeding operations");
        return Ok(());
    }

    info!("Seeding database with example resource types");
    for (name, max_speed) in [("forklift", 30), ("truck", 90)] {
        sqlx::query("INSERT INTO resource_type (name, max_speed) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(name)
            .bind(max_speed)
            .execute(&mut *tx)
            .await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Create the CORS layer from configuration
fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let mut origins = Vec::new();
    for origin in &config.cors.allowed_origins {
        origins.push(origin.parse::<HeaderValue>()?);
    }
    Ok(CorsLayer::new().allow_origin(origins))
}

/// Serve the raw OpenAPI document
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Unknown routes get the same JSON error shape as everything else
async fn not_found() -> errors::Error {
    errors::Error::NotFound {
        message: "not found".to_string(),
    }
}

/// Build the application router with all endpoints and middleware.
///
/// - Resource type and resource CRUD routes
/// - `/healthz` liveness route
/// - OpenAPI document and rendered docs
/// - CORS configuration and tracing middleware
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let cors_layer = create_cors_layer(&state.config)?;

    let api_routes = Router::new()
        .route(
            "/resource_types",
            get(api::handlers::resource_types::list_resource_types)
                .post(api::handlers::resource_types::create_resource_type)
                .delete(api::handlers::resource_types::delete_resource_types),
        )
        .route(
            "/resource_types/{id}",
            get(api::handlers::resource_types::get_resource_type).patch(api::handlers::resource_types::update_resource_type),
        )
        .route(
            "/resources",
            get(api::handlers::resources::list_resources)
                .post(api::handlers::resources::create_resource)
                .delete(api::handlers::resources::delete_resources),
        )
        .route(
            "/resources/{id}",
            get(api::handlers::resources::get_resource).patch(api::handlers::resources::update_resource),
        )
        .with_state(state);

    let router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(openapi_json))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()))
        .fallback(not_found)
        .layer(cors_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    Ok(router)
}

/// The assembled application: router, connection pool, configuration.
pub struct Application {
    router: Router,
    config: Config,
    pool: PgPool,
}

impl Application {
    /// Create a new application instance with all resources initialized
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        debug!("Starting fleetctl with configuration: {:#?}", config);

        let pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;

        migrator().run(&pool).await?;
        seed_database(&pool).await?;

        let state = AppState {
            db: pool.clone(),
            config: config.clone(),
        };
        let router = build_router(state)?;

        Ok(Self { router, config, pool })
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("fleetctl listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("Closing database connections...");
        self.pool.close().await;

        Ok(())
    }
}
