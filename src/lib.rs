//! KEN Library
//!
//! Catalog, physical copies, members and the lending ledger of a small
//! library, served as a REST JSON API over an embedded SQLite store.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}

impl AppState {
    /// Wire services over `repository` using the library section of `config`
    pub fn new(config: AppConfig, repository: repository::Repository) -> Self {
        let services = services::Services::new(repository, config.library.clone());
        Self {
            config: Arc::new(config),
            services: Arc::new(services),
        }
    }
}
