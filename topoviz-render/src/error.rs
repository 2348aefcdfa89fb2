use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image encoding failed: {0}")]
    EncodeError(#[from] image::ImageError),

    #[error("Could not move finished file into place: {0}")]
    PersistError(#[from] tempfile::PersistError),

    #[error("Snapshot serialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid render options: {0}")]
    InvalidOptions(String),
}

pub type Result<T> = std::result::Result<T, RenderError>;
