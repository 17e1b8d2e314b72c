use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    adapters::dto::link_dto::{LinkRequest, ShareableLinkResponse},
    application::{
        error::ApplicationError,
        files::{get_download_link, get_shareable_link},
        services::IpfsService,
    },
    domain::{config::settings::AppConfig, models::file::FileDownload},
};

pub struct LinkController;

impl LinkController {
    fn gateway_url(config: &AppConfig, requested: Option<String>) -> String {
        requested
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| config.gateway_url.clone())
    }

    /// POST /api/v1/links/download
    pub async fn download_link(
        State(config): State<Arc<AppConfig>>,
        State(ipfs): State<Arc<dyn IpfsService>>,
        Json(body): Json<LinkRequest>,
    ) -> Result<Json<FileDownload>, ApplicationError> {
        let gateway_url = Self::gateway_url(&config, body.gateway_url);
        info!(
            "Building download link for {} entries via {}",
            body.files.len(),
            gateway_url
        );

        let download = get_download_link(&body.files, &gateway_url, ipfs.as_ref()).await?;
        Ok(Json(download))
    }

    /// POST /api/v1/links/share
    pub async fn shareable_link(
        State(config): State<Arc<AppConfig>>,
        State(ipfs): State<Arc<dyn IpfsService>>,
        Json(body): Json<LinkRequest>,
    ) -> Result<Json<ShareableLinkResponse>, ApplicationError> {
        let gateway_url = Self::gateway_url(&config, body.gateway_url);
        info!(
            "Building shareable link for {} entries via {}",
            body.files.len(),
            gateway_url
        );

        let url = get_shareable_link(&body.files, &gateway_url, ipfs.as_ref()).await?;
        Ok(Json(ShareableLinkResponse { url }))
    }
}
