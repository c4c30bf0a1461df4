use thiserror::Error;

/// Error types for the CineInfo service.
///
/// Every failure that can happen while looking up a movie surfaces as one of
/// these variants. The HTTP layer does not distinguish between them: anything
/// escaping the movie service becomes a 500 response.
///
/// # Examples
///
/// ```
/// use cineinfo::{CineInfoError, Result};
///
/// fn require_title(title: &str) -> Result<()> {
///     if title.is_empty() {
///         return Err(CineInfoError::ValidationError("title is empty".into()));
///     }
///     Ok(())
/// }
///
/// match require_title("") {
///     Err(CineInfoError::ValidationError(msg)) => println!("Invalid: {}", msg),
///     other => println!("Unexpected: {:?}", other),
/// }
/// ```
#[derive(Error, Debug)]
pub enum CineInfoError {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The Gemini API answered with an error or an unusable payload
    #[error("API error: {0}")]
    ApiError(String),

    /// The reply could not be read as JSON after removing markdown fences
    #[error("invalid JSON from model: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The decoded reply does not match the movie schema
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// HTTP client error (from reqwest)
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

// reqwest::Error and serde_json::Error don't implement PartialEq,
// so HttpError and InvalidJson never compare equal.
impl PartialEq for CineInfoError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ConfigError(a), Self::ConfigError(b)) => a == b,
            (Self::ApiError(a), Self::ApiError(b)) => a == b,
            (Self::ValidationError(a), Self::ValidationError(b)) => a == b,
            _ => false,
        }
    }
}

/// A specialized Result type for CineInfo operations.
pub type Result<T> = std::result::Result<T, CineInfoError>;
