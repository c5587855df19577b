pub mod context;
pub mod handler;
pub mod response;
pub mod service;
pub mod tap;

use crate::config::AppConfig;

/// Shared, read-only state for every connection.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub cfg: AppConfig,
}

impl AppState {
    pub fn new(cfg: AppConfig) -> Self {
        Self { cfg }
    }
}
