use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuillError {
    #[error("Not in a quill project. Run 'quill init' first.")]
    NotInitialized,

    #[error("Already initialized. Remove .quill/ to reinitialize.")]
    AlreadyInitialized,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidScope(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Hierarchy cycle detected at {0}")]
    CycleDetected(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, QuillError>;
