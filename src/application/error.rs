#[derive(Debug)]
pub enum ApplicationError {
    NotFound,
    BadRequest(String),
    StorageError(String),
    InternalError(String),
}

impl std::fmt::Display for ApplicationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationError::NotFound => write!(f, "not found"),
            ApplicationError::BadRequest(msg) => write!(f, "bad request: {}", msg),
            ApplicationError::StorageError(msg) => write!(f, "storage error: {}", msg),
            ApplicationError::InternalError(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApplicationError {}
