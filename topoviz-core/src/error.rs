use thiserror::Error;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{url} answered with HTTP status {status}")]
    StatusError { url: String, status: u16 },

    #[error("Response body is not valid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Route document must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("Route '{route}': {detail}")]
    SchemaError { route: String, detail: String },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
