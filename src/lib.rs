//! Library record-keeper
//!
//! Tracks members, books and active borrows behind a REST JSON API. Borrowing
//! and returning go through the inventory ledger, which keeps every book's
//! shelf count and loan records consistent under concurrent requests.

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
