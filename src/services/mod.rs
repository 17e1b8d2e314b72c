mod error;
mod kubo_ipfs;

pub use error::IpfsError;
pub use kubo_ipfs::KuboIpfsService;

use std::sync::Arc;

use crate::{
    application::services::IpfsService,
    domain::config::settings::{AppConfig, Provider},
};

pub fn create_ipfs_service(config: &AppConfig) -> Result<Arc<dyn IpfsService>, IpfsError> {
    match config.provider {
        Provider::Kubo => {
            let service = KuboIpfsService::new(&config.api_url, config.timeout_secs)?;
            Ok(Arc::new(service))
        }
    }
}
