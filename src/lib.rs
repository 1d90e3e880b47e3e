//! Librarium Library Record Keeper
//!
//! Tracks books, purchases, members and borrowing transactions, enforcing
//! stock levels and the member debt ceiling on every mutation. The crate
//! is embedded by a request-handling layer and consumed through plain
//! async calls on [`services::Services`].

use std::sync::Arc;

pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod telemetry;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state handed to the embedding layer
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Connect to the database, run migrations and wire up the services
    pub async fn initialize(config: AppConfig) -> AppResult<Self> {
        let pool = config.database.connect().await?;
        tracing::info!("Connected to database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(sqlx::Error::from)?;
        tracing::info!("Database migrations completed");

        let repository = repository::Repository::new(pool);
        let services = services::Services::new(repository);

        Ok(Self {
            config: Arc::new(config),
            services: Arc::new(services),
        })
    }
}
