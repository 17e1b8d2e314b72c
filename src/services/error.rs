use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum IpfsError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response from node: {0}")]
    InvalidResponse(String),

    #[error("IPFS node error: {0}")]
    ProviderError(String),

    #[error("Invalid upload path: {0}")]
    InvalidPath(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<IpfsError> for ApplicationError {
    fn from(error: IpfsError) -> Self {
        match error {
            IpfsError::NotFound(_) => ApplicationError::NotFound,
            IpfsError::InvalidPath(path) => {
                ApplicationError::BadRequest(format!("invalid upload path '{}'", path))
            }
            IpfsError::NetworkError(msg)
            | IpfsError::InvalidResponse(msg)
            | IpfsError::ProviderError(msg) => ApplicationError::StorageError(msg),
            IpfsError::InternalError(msg) => ApplicationError::InternalError(msg),
        }
    }
}

impl From<reqwest::Error> for IpfsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            IpfsError::NetworkError("Request timeout".to_string())
        } else if error.is_connect() {
            IpfsError::NetworkError(format!("Connection failed: {}", error))
        } else if error.is_decode() {
            IpfsError::InvalidResponse(error.to_string())
        } else if let Some(status) = error.status() {
            match status.as_u16() {
                404 => IpfsError::NotFound(error.to_string()),
                _ => IpfsError::ProviderError(error.to_string()),
            }
        } else {
            IpfsError::InternalError(error.to_string())
        }
    }
}
