use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookdexError {
    #[error("invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error from {0}: {1}")]
    Api(String, String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("missing field: {0}")]
    MissingField(&'static str),

    #[error("index {index} out of range for result set of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, BookdexError>;
