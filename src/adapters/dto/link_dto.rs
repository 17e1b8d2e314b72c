use serde::{Deserialize, Serialize};

use crate::domain::models::file::FileStat;

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    pub files: Vec<FileStat>,
    /// Overrides the configured gateway for this request.
    #[serde(rename = "gatewayUrl")]
    pub gateway_url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShareableLinkResponse {
    pub url: String,
}
