use serde::{Deserialize, Serialize};

use crate::domain::models::file::AddedEntry;

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadFilesResponse {
    pub entries: Vec<AddedEntry>,
}
