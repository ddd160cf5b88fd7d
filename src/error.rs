use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitfolioError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    FetchFailed(String),

    #[error("GitHub API error: {0}")]
    ApiError(String),

    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Base64 decoding error: {0}")]
    DecodeError(#[from] base64::DecodeError),

    #[error("Invalid UTF-8 content: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl GitfolioError {
    /// Whether the provider reported the resource as absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GitfolioError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, GitfolioError>;
