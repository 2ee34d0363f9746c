use std::error::Error;
use std::fmt;

/// Error type for block-explorer client operations
#[derive(Debug)]
pub enum ApiClientError {
    /// Error from the reqwest HTTP client
    HttpError(reqwest::Error),
    /// Error parsing JSON
    JsonError(serde_json::Error),
    /// Explorer answered with a non-success status
    ApiError(String),
    /// Response body did not have the expected shape
    ResponseError(String),
    /// No API key configured
    MissingApiKey,
}

impl fmt::Display for ApiClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiClientError::HttpError(e) => write!(f, "HTTP error: {}", e),
            ApiClientError::JsonError(e) => write!(f, "JSON error: {}", e),
            ApiClientError::ApiError(msg) => write!(f, "API error: {}", msg),
            ApiClientError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            ApiClientError::MissingApiKey => write!(f, "API key not configured"),
        }
    }
}

impl Error for ApiClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiClientError::HttpError(e) => Some(e),
            ApiClientError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    fn from(error: reqwest::Error) -> Self {
        ApiClientError::HttpError(error)
    }
}

impl From<serde_json::Error> for ApiClientError {
    fn from(error: serde_json::Error) -> Self {
        ApiClientError::JsonError(error)
    }
}
