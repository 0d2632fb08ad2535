use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{config::AppConfig, services::trip_form::TripFormController};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    /// The one trip screen served by this process.
    pub screen: Arc<Mutex<TripFormController>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            screen: Arc::new(Mutex::new(TripFormController::new())),
        }
    }
}
