use crate::config::Config;
use crate::models::AppData;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Composition root: owns the canonical habit, check-in and badge
/// collections. Handlers hand the engine read-only borrows of them.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub data: Arc<Mutex<AppData>>,
}

impl AppState {
    pub fn new(config: Config, data: AppData) -> Self {
        Self {
            config: Arc::new(config),
            data: Arc::new(Mutex::new(data)),
        }
    }
}
