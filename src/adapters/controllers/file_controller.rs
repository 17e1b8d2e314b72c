use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use tracing::{info, warn};

use crate::{
    adapters::dto::file_dto::UploadFilesResponse,
    application::{error::ApplicationError, files::normalize_files, services::IpfsService},
    domain::models::file::SelectedFile,
};

pub struct FileController;

impl FileController {
    /// Splits a multipart file name into a selected file. Browsers send the
    /// relative path as the file name for directory uploads.
    fn selected_file(file_name: &str, content: Vec<u8>) -> SelectedFile {
        match file_name.rsplit_once('/') {
            Some((_, base)) => {
                SelectedFile::new(base, content).with_webkit_relative_path(file_name)
            }
            None => SelectedFile::new(file_name, content),
        }
    }

    /// POST /api/v1/files
    /// A `filepath` text field applies to the `file` field that follows it.
    pub async fn upload_files(
        State(ipfs): State<Arc<dyn IpfsService>>,
        mut multipart: Multipart,
    ) -> Result<(StatusCode, Json<UploadFilesResponse>), ApplicationError> {
        let mut selected = Vec::new();
        let mut pending_filepath: Option<String> = None;

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            warn!("Invalid multipart data: {}", e);
            ApplicationError::BadRequest("Invalid request format".to_string())
        })? {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "filepath" => {
                    pending_filepath = Some(field.text().await.map_err(|e| {
                        warn!("Invalid filepath field: {}", e);
                        ApplicationError::BadRequest("Invalid request data".to_string())
                    })?);
                }
                "file" => {
                    let file_name = field.file_name().unwrap_or("").to_string();
                    let content = field
                        .bytes()
                        .await
                        .map_err(|e| {
                            warn!("Cannot read file bytes: {}", e);
                            ApplicationError::BadRequest("Invalid file data".to_string())
                        })?
                        .to_vec();

                    let mut file = Self::selected_file(&file_name, content);
                    file.filepath = pending_filepath.take();
                    selected.push(file);
                }
                _ => {}
            }
        }

        if let Some(filepath) = pending_filepath {
            warn!("'filepath' field '{}' not followed by a 'file' field", filepath);
            return Err(ApplicationError::BadRequest(
                "'filepath' must precede a 'file' field".to_string(),
            ));
        }

        if selected.is_empty() {
            warn!("Upload without any 'file' field");
            return Err(ApplicationError::BadRequest("no files selected".to_string()));
        }

        let streams = normalize_files(selected);
        info!("Uploading {} normalized streams", streams.len());

        let entries = ipfs.add(streams).await?;

        Ok((StatusCode::CREATED, Json(UploadFilesResponse { entries })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_file_names_become_webkit_paths() {
        let file = FileController::selected_file("photos/2024/cat.png", vec![1]);
        assert_eq!(file.name, "cat.png");
        assert_eq!(file.webkit_relative_path.as_deref(), Some("photos/2024/cat.png"));

        let file = FileController::selected_file("cat.png", vec![1]);
        assert_eq!(file.name, "cat.png");
        assert!(file.webkit_relative_path.is_none());
    }
}
