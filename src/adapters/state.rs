use axum::extract::FromRef;
use std::sync::Arc;

use crate::{application::services::IpfsService, domain::config::settings::AppConfig};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub ipfs_service: Arc<dyn IpfsService>,
}

impl AppState {
    pub fn new(config: AppConfig, ipfs_service: Arc<dyn IpfsService>) -> Self {
        Self {
            config: Arc::new(config),
            ipfs_service,
        }
    }
}
